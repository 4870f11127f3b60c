//! # Environment Collaborator
//!
//! Lookup of environment variables for the `Environment` credential source.

use std::collections::HashMap;
use std::env::VarError;

/// Source of environment variables
pub trait EnvSource: Send + Sync {
    /// Same contract as [`std::env::var`]
    fn var(&self, name: &str) -> Result<String, VarError>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

/// A fixed set of variables, for callers that resolve against a captured
/// environment instead of the live process one
impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Result<String, VarError> {
        self.get(name).cloned().ok_or(VarError::NotPresent)
    }
}
