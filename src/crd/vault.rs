//! # Vault Secret Store Configuration
//!
//! Vault KV store settings and the Vault authentication methods.
//! See <https://developer.hashicorp.com/vault/docs/auth> for the methods.

use crate::crd::{ServiceAccountTokenSourceConfig, VaultAuthTokenConfig, VaultCABundleConfig};
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// API version of the Vault KV secrets engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum VaultKvVersion {
    /// KV Secrets Engine Version 1
    #[serde(rename = "v1")]
    V1,
    /// KV Secrets Engine Version 2
    #[default]
    #[serde(rename = "v2")]
    V2,
}

/// Vault secret store configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecretStoreConfig {
    /// Server is the url of the Vault server, e.g. "https://vault.acme.org"
    pub server: String,
    /// Vault namespace to operate in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// MountPath is the mount path of the KV secrets engine
    pub mount_path: String,
    /// Version of the KV secrets engine. Defaults to v2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VaultKvVersion>,
    /// CA bundle trusted for the Vault server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<VaultCABundleConfig>,
    /// Authentication method for Vault
    pub auth: VaultAuthConfig,
}

impl VaultSecretStoreConfig {
    /// KV engine version with the v2 default applied
    #[must_use]
    pub fn effective_version(&self) -> VaultKvVersion {
        self.version.unwrap_or_default()
    }
}

/// Vault authentication method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum VaultAuthMethod {
    /// Token auth, <https://developer.hashicorp.com/vault/docs/auth/token>
    Token,
    /// Kubernetes auth, <https://developer.hashicorp.com/vault/docs/auth/kubernetes>
    Kubernetes,
}

impl VaultAuthMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultAuthMethod::Token => "Token",
            VaultAuthMethod::Kubernetes => "Kubernetes",
        }
    }
}

impl fmt::Display for VaultAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for Vault Kubernetes auth
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaultAuthKubernetesConfig {
    /// Name of the Vault role bound to this app's Kubernetes service account
    pub role: String,
    /// MountPath of the kubernetes auth method in Vault
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mount_path: String,
    /// Where to read the service account token from when it is not mounted
    /// under `/var/run/secrets/kubernetes.io/serviceaccount/token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_token_source: Option<ServiceAccountTokenSourceConfig>,
}

/// Authentication to a Vault API
///
/// The `method` field on the wire picks the variant. Only the block matching
/// the method is kept; a missing block is reported when the store config is
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "VaultAuthConfigWire", into = "VaultAuthConfigWire")]
pub enum VaultAuthConfig {
    Token(Option<VaultAuthTokenConfig>),
    Kubernetes(Option<VaultAuthKubernetesConfig>),
}

impl VaultAuthConfig {
    #[must_use]
    pub fn method(&self) -> VaultAuthMethod {
        match self {
            VaultAuthConfig::Token(_) => VaultAuthMethod::Token,
            VaultAuthConfig::Kubernetes(_) => VaultAuthMethod::Kubernetes,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct VaultAuthConfigWire {
    method: VaultAuthMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<VaultAuthTokenConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kubernetes: Option<VaultAuthKubernetesConfig>,
}

impl From<VaultAuthConfigWire> for VaultAuthConfig {
    fn from(wire: VaultAuthConfigWire) -> Self {
        match wire.method {
            VaultAuthMethod::Token => VaultAuthConfig::Token(wire.token),
            VaultAuthMethod::Kubernetes => VaultAuthConfig::Kubernetes(wire.kubernetes),
        }
    }
}

impl From<VaultAuthConfig> for VaultAuthConfigWire {
    fn from(config: VaultAuthConfig) -> Self {
        match config {
            VaultAuthConfig::Token(token) => VaultAuthConfigWire {
                method: VaultAuthMethod::Token,
                token,
                kubernetes: None,
            },
            VaultAuthConfig::Kubernetes(kubernetes) => VaultAuthConfigWire {
                method: VaultAuthMethod::Kubernetes,
                token: None,
                kubernetes,
            },
        }
    }
}

impl JsonSchema for VaultAuthConfig {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("VaultAuthConfig")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "description": "Authentication to a Vault API. Only the block matching the method is used.",
            "properties": {
                "method": {
                    "type": "string",
                    "enum": ["Token", "Kubernetes"],
                    "description": "Method configures which auth method will be used."
                },
                "token": generator.subschema_for::<VaultAuthTokenConfig>(),
                "kubernetes": generator.subschema_for::<VaultAuthKubernetesConfig>()
            },
            "required": ["method"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_selects_matching_block_and_drops_the_other() {
        let json = r#"{
            "method": "Token",
            "token": {"source": "Environment", "env": {"name": "VAULT_TOKEN"}},
            "kubernetes": {"role": "ignored"}
        }"#;
        let auth: VaultAuthConfig = serde_json::from_str(json).unwrap();
        assert_eq!(auth.method(), VaultAuthMethod::Token);
        match auth {
            VaultAuthConfig::Token(Some(token)) => {
                assert_eq!(token.selectors.env.unwrap().name, "VAULT_TOKEN");
            }
            other => panic!("Expected token auth, got {other:?}"),
        }
    }

    #[test]
    fn method_without_block_is_kept_for_dispatch() {
        let auth: VaultAuthConfig = serde_json::from_str(r#"{"method":"Kubernetes"}"#).unwrap();
        assert_eq!(auth, VaultAuthConfig::Kubernetes(None));
    }

    #[test]
    fn method_is_required() {
        assert!(serde_json::from_str::<VaultAuthConfig>(r#"{"token":{"source":"None"}}"#).is_err());
    }

    #[test]
    fn kv_version_defaults_to_v2() {
        let json = r#"{
            "server": "https://vault.acme.org",
            "mountPath": "secret",
            "auth": {"method": "Token", "token": {"source": "None"}}
        }"#;
        let vault: VaultSecretStoreConfig = serde_json::from_str(json).unwrap();
        assert!(vault.version.is_none());
        assert_eq!(vault.effective_version(), VaultKvVersion::V2);
        assert!(vault.namespace.is_empty());
    }

    #[test]
    fn kv_version_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_value(VaultKvVersion::V1).unwrap(),
            serde_json::json!("v1")
        );
        assert!(serde_json::from_str::<VaultKvVersion>(r#""v3""#).is_err());
    }

    #[test]
    fn empty_mount_path_is_omitted() {
        let config = VaultAuthKubernetesConfig {
            role: "r".to_string(),
            mount_path: String::new(),
            service_account_token_source: None,
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({"role": "r"})
        );
    }
}
