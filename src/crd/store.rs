//! # Secret Store Configuration
//!
//! Selects the backend connection secrets are written to: in-cluster
//! Kubernetes secrets, a Vault KV engine, or an external store plugin.
//!
//! Kubernetes sends data in the format `{"type": "Vault", "defaultScope": ..., "vault": {...}}`.
//! The `type` field picks the backend and only its block is kept; blocks for
//! other backends are accepted and ignored.

use crate::crd::{Config, KubernetesAuthConfig, VaultSecretStoreConfig};
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Secret store backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum SecretStoreType {
    /// Connection secrets are stored as Kubernetes secrets (DEFAULT)
    #[default]
    Kubernetes,
    /// Connection secrets are stored in Vault
    Vault,
    /// Connection secrets are handed to an external secret store plugin
    Plugin,
}

impl SecretStoreType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretStoreType::Kubernetes => "Kubernetes",
            SecretStoreType::Vault => "Vault",
            SecretStoreType::Plugin => "Plugin",
        }
    }
}

impl fmt::Display for SecretStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a secret store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "SecretStoreConfigWire", into = "SecretStoreConfigWire")]
pub struct SecretStoreConfig {
    /// Scope for secrets of cluster-scoped resources.
    /// The default namespace for Kubernetes stores, the default parent path
    /// for Vault. Typically the installation namespace.
    pub default_scope: String,
    /// The selected backend
    pub store: SecretStore,
}

/// The selected secret store backend and its configuration block
///
/// The block is `None` when the type was selected without configuring it;
/// resolving such a store fails with an invalid configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretStore {
    Kubernetes(Option<KubernetesSecretStoreConfig>),
    Vault(Option<VaultSecretStoreConfig>),
    Plugin(Option<PluginStoreConfig>),
}

impl SecretStore {
    #[must_use]
    pub fn store_type(&self) -> SecretStoreType {
        match self {
            SecretStore::Kubernetes(_) => SecretStoreType::Kubernetes,
            SecretStore::Vault(_) => SecretStoreType::Vault,
            SecretStore::Plugin(_) => SecretStoreType::Plugin,
        }
    }
}

impl SecretStoreConfig {
    pub fn kubernetes(default_scope: impl Into<String>, config: KubernetesSecretStoreConfig) -> Self {
        Self {
            default_scope: default_scope.into(),
            store: SecretStore::Kubernetes(Some(config)),
        }
    }

    pub fn vault(default_scope: impl Into<String>, config: VaultSecretStoreConfig) -> Self {
        Self {
            default_scope: default_scope.into(),
            store: SecretStore::Vault(Some(config)),
        }
    }

    pub fn plugin(default_scope: impl Into<String>, config: PluginStoreConfig) -> Self {
        Self {
            default_scope: default_scope.into(),
            store: SecretStore::Plugin(Some(config)),
        }
    }

    #[must_use]
    pub fn store_type(&self) -> SecretStoreType {
        self.store.store_type()
    }
}

/// Kubernetes secret store configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesSecretStoreConfig {
    /// Credentials used to connect to the Kubernetes API
    pub auth: KubernetesAuthConfig,
}

/// External secret store plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginStoreConfig {
    /// Endpoint of the plugin's gRPC server
    pub endpoint: String,
    /// Store config the plugin reads its own settings from
    pub config_ref: Config,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SecretStoreConfigWire {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    store_type: Option<SecretStoreType>,
    default_scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kubernetes: Option<KubernetesSecretStoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vault: Option<VaultSecretStoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plugin: Option<PluginStoreConfig>,
}

impl From<SecretStoreConfigWire> for SecretStoreConfig {
    fn from(wire: SecretStoreConfigWire) -> Self {
        let store = match wire.store_type.unwrap_or_default() {
            SecretStoreType::Kubernetes => SecretStore::Kubernetes(wire.kubernetes),
            SecretStoreType::Vault => SecretStore::Vault(wire.vault),
            SecretStoreType::Plugin => SecretStore::Plugin(wire.plugin),
        };
        Self {
            default_scope: wire.default_scope,
            store,
        }
    }
}

impl From<SecretStoreConfig> for SecretStoreConfigWire {
    fn from(config: SecretStoreConfig) -> Self {
        let mut wire = SecretStoreConfigWire {
            store_type: Some(config.store.store_type()),
            default_scope: config.default_scope,
            kubernetes: None,
            vault: None,
            plugin: None,
        };
        match config.store {
            SecretStore::Kubernetes(kubernetes) => wire.kubernetes = kubernetes,
            SecretStore::Vault(vault) => wire.vault = vault,
            SecretStore::Plugin(plugin) => wire.plugin = plugin,
        }
        wire
    }
}

impl JsonSchema for SecretStoreConfig {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("SecretStoreConfig")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "description": "Configuration of a secret store. Only the block for the selected type is used; others are ignored.",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["Kubernetes", "Vault", "Plugin"],
                    "default": "Kubernetes",
                    "description": "Type configures which secret store to be used. Default is Kubernetes."
                },
                "defaultScope": {
                    "type": "string",
                    "description": "Scope used for secrets of cluster-scoped resources: the namespace for Kubernetes, the parent path for Vault."
                },
                "kubernetes": generator.subschema_for::<KubernetesSecretStoreConfig>(),
                "vault": generator.subschema_for::<VaultSecretStoreConfig>(),
                "plugin": generator.subschema_for::<PluginStoreConfig>()
            },
            "required": ["defaultScope"]
        })
    }
}
