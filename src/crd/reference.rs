//! # References
//!
//! Named pointers to other configuration objects.

use crate::constants::DEFAULT_STORE_CONFIG_NAME;
use serde::{Deserialize, Serialize};

/// Reference to another object by name
///
/// The referent's kind is implied by the field holding the reference.
/// Resolution is an exact, case-sensitive name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the referenced object
    pub name: String,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Reference {
    /// The store config used when a resource does not pick one
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CONFIG_NAME)
    }
}

/// Typed reference to a store config object
///
/// Used where the referent's type is not implicit, e.g. the config object
/// a secret store plugin reads its own settings from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// APIVersion of the referenced config
    pub api_version: String,
    /// Kind of the referenced config
    pub kind: String,
    /// Name of the referenced config
    pub name: String,
}
