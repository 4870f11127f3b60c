//! # Connection Secret Configuration
//!
//! Where a resource publishes its connection details and which metadata the
//! generated secret carries.

use crate::constants::LABEL_KEY_OWNER_UID;
use crate::crd::Reference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration of a connection secret
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishConnectionDetailsTo {
    /// Name is the name of the connection secret
    pub name: String,
    /// Metadata is the metadata for connection secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConnectionSecretMetadata>,
    /// Which secret store config should be used for this connection secret.
    /// Defaults to the store config named "default".
    #[serde(
        default,
        rename = "configRef",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_store_config_ref: Option<Reference>,
}

impl PublishConnectionDetailsTo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
            secret_store_config_ref: None,
        }
    }

    /// The store config to use, falling back to the one named "default"
    #[must_use]
    pub fn config_ref_or_default(&self) -> Reference {
        self.secret_store_config_ref.clone().unwrap_or_default()
    }

    /// Stamp the owner UID onto the secret metadata, creating it if needed
    pub fn set_owner_uid(&mut self, uid: impl Into<String>) {
        self.metadata
            .get_or_insert_with(ConnectionSecretMetadata::default)
            .set_owner_uid(uid);
    }
}

/// Metadata of a connection secret
///
/// Labels are used to track ownership of connection secrets and have to be
/// supported by every secret store implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSecretMetadata {
    /// Labels to add to the connection secret.
    /// For Kubernetes secrets this becomes "metadata.labels"; other stores
    /// decide how to map them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    /// Annotations to add to the connection secret.
    /// For Kubernetes secrets this becomes "metadata.annotations"; other
    /// stores decide how to map them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    /// Kubernetes secret type (e.g. "Opaque"). Only valid for Kubernetes stores.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
}

impl ConnectionSecretMetadata {
    /// Set the owner UID label
    ///
    /// Creates the label map on first write, overwrites a previous owner and
    /// leaves every other label untouched.
    pub fn set_owner_uid(&mut self, uid: impl Into<String>) {
        let uid = uid.into();
        debug!(owner.uid = %uid, "Stamping owner UID label on connection secret metadata");
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(LABEL_KEY_OWNER_UID.to_string(), uid);
    }

    /// The owner UID, or an empty string if it was never set
    #[must_use]
    pub fn get_owner_uid(&self) -> &str {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(LABEL_KEY_OWNER_UID))
            .map_or("", String::as_str)
    }
}
