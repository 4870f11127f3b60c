//! # Store Config Validation
//!
//! Validates secret store configurations and connection secret targets.

use super::credentials::validate_credentials;
use super::kubernetes::{validate_kubernetes_name, validate_kubernetes_namespace};
use crate::crd::{
    PluginStoreConfig, PublishConnectionDetailsTo, SecretStore, SecretStoreConfig,
    VaultAuthConfig, VaultSecretStoreConfig,
};
use anyhow::{Context, Result};

/// Validate a secret store configuration
///
/// Only the selected backend is checked. Blocks for other backends are
/// ignored, matching how the configuration is resolved.
pub fn validate_secret_store_config(config: &SecretStoreConfig) -> Result<()> {
    if config.default_scope.is_empty() {
        return Err(anyhow::anyhow!("defaultScope is required but is empty"));
    }

    let store_type = config.store_type();
    let missing_block =
        || anyhow::anyhow!("{store_type} selected but no matching configuration block present");

    match &config.store {
        SecretStore::Kubernetes(kubernetes) => {
            // For Kubernetes stores the scope is the default namespace
            validate_kubernetes_namespace(&config.default_scope, "defaultScope")?;
            // No block means in-cluster config
            if let Some(kubernetes) = kubernetes {
                validate_credentials(&kubernetes.auth, "kubernetes.auth")?;
            }
        }
        SecretStore::Vault(vault) => {
            let vault = vault.as_ref().ok_or_else(missing_block)?;
            validate_vault(vault)?;
        }
        SecretStore::Plugin(plugin) => {
            let plugin = plugin.as_ref().ok_or_else(missing_block)?;
            validate_plugin(plugin)?;
        }
    }
    Ok(())
}

fn validate_vault(vault: &VaultSecretStoreConfig) -> Result<()> {
    if vault.server.is_empty() {
        return Err(anyhow::anyhow!("vault.server is required but is empty"));
    }
    if !(vault.server.starts_with("https://") || vault.server.starts_with("http://")) {
        return Err(anyhow::anyhow!(
            "vault.server '{}' must be an http:// or https:// URL",
            vault.server
        ));
    }
    if vault.mount_path.is_empty() {
        return Err(anyhow::anyhow!("vault.mountPath is required but is empty"));
    }
    if let Some(ca_bundle) = &vault.ca_bundle {
        validate_credentials(ca_bundle, "vault.caBundle")?;
    }

    match &vault.auth {
        VaultAuthConfig::Token(token) => {
            let token = token.as_ref().ok_or_else(|| {
                anyhow::anyhow!("vault.auth.token is required when method is Token")
            })?;
            validate_credentials(token, "vault.auth.token")?;
        }
        VaultAuthConfig::Kubernetes(kubernetes) => {
            let kubernetes = kubernetes.as_ref().ok_or_else(|| {
                anyhow::anyhow!("vault.auth.kubernetes is required when method is Kubernetes")
            })?;
            if kubernetes.role.is_empty() {
                return Err(anyhow::anyhow!(
                    "vault.auth.kubernetes.role is required but is empty"
                ));
            }
            if let Some(source) = &kubernetes.service_account_token_source {
                validate_credentials(
                    source,
                    "vault.auth.kubernetes.serviceAccountTokenSource",
                )?;
            }
        }
    }
    Ok(())
}

fn validate_plugin(plugin: &PluginStoreConfig) -> Result<()> {
    if plugin.endpoint.is_empty() {
        return Err(anyhow::anyhow!("plugin.endpoint is required but is empty"));
    }
    let config_ref = &plugin.config_ref;
    if config_ref.api_version.is_empty() {
        return Err(anyhow::anyhow!(
            "plugin.configRef.apiVersion is required but is empty"
        ));
    }
    if config_ref.kind.is_empty() {
        return Err(anyhow::anyhow!("plugin.configRef.kind is required but is empty"));
    }
    validate_kubernetes_name(&config_ref.name, "plugin.configRef.name")
}

/// Validate where a resource publishes its connection details
pub fn validate_publish_connection_details_to(publish: &PublishConnectionDetailsTo) -> Result<()> {
    validate_kubernetes_name(&publish.name, "name")
        .context("Invalid connection secret name")?;
    if let Some(config_ref) = &publish.secret_store_config_ref {
        validate_kubernetes_name(&config_ref.name, "configRef.name")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{
        Config, KubernetesAuthConfig, KubernetesSecretStoreConfig, Reference,
        VaultAuthKubernetesConfig,
    };

    fn vault(auth: VaultAuthConfig) -> VaultSecretStoreConfig {
        VaultSecretStoreConfig {
            server: "https://vault.acme.org".to_string(),
            namespace: String::new(),
            mount_path: "secret/".to_string(),
            version: None,
            ca_bundle: None,
            auth,
        }
    }

    #[test]
    fn valid_kubernetes_store() {
        let config = SecretStoreConfig::kubernetes(
            "crossplane-system",
            KubernetesSecretStoreConfig {
                auth: KubernetesAuthConfig::none(),
            },
        );
        assert!(validate_secret_store_config(&config).is_ok());
    }

    #[test]
    fn kubernetes_store_without_block_is_valid() {
        let config = SecretStoreConfig {
            default_scope: "crossplane-system".to_string(),
            store: SecretStore::Kubernetes(None),
        };
        assert!(validate_secret_store_config(&config).is_ok());
    }

    #[test]
    fn empty_default_scope_is_rejected() {
        let config = SecretStoreConfig::kubernetes(
            "",
            KubernetesSecretStoreConfig {
                auth: KubernetesAuthConfig::none(),
            },
        );
        let err = validate_secret_store_config(&config).unwrap_err();
        assert!(err.to_string().contains("defaultScope"));
    }

    #[test]
    fn vault_scope_may_be_a_path() {
        let config = SecretStoreConfig::vault(
            "crossplane-system/connections",
            vault(VaultAuthConfig::Kubernetes(Some(VaultAuthKubernetesConfig {
                role: "crossplane".to_string(),
                mount_path: String::new(),
                service_account_token_source: None,
            }))),
        );
        assert!(validate_secret_store_config(&config).is_ok());
    }

    #[test]
    fn vault_kubernetes_auth_requires_role() {
        let config = SecretStoreConfig::vault(
            "crossplane-system",
            vault(VaultAuthConfig::Kubernetes(Some(VaultAuthKubernetesConfig {
                role: String::new(),
                mount_path: String::new(),
                service_account_token_source: None,
            }))),
        );
        let err = validate_secret_store_config(&config).unwrap_err();
        assert!(err.to_string().contains("role"));
    }

    #[test]
    fn vault_server_must_be_a_url() {
        let mut config = vault(VaultAuthConfig::Token(Some(
            crate::crd::VaultAuthTokenConfig::none(),
        )));
        config.server = "vault.acme.org".to_string();
        let config = SecretStoreConfig::vault("crossplane-system", config);
        assert!(validate_secret_store_config(&config).is_err());
    }

    #[test]
    fn selected_block_must_be_present() {
        let config = SecretStoreConfig {
            default_scope: "crossplane-system".to_string(),
            store: SecretStore::Plugin(None),
        };
        let err = validate_secret_store_config(&config).unwrap_err();
        assert!(err
            .to_string()
            .contains("Plugin selected but no matching configuration block present"));
    }

    #[test]
    fn plugin_requires_endpoint_and_config_ref() {
        let plugin = PluginStoreConfig {
            endpoint: String::new(),
            config_ref: Config {
                api_version: "secrets.crossplane.io/v1alpha1".to_string(),
                kind: "VaultConfig".to_string(),
                name: "vault".to_string(),
            },
        };
        let config = SecretStoreConfig::plugin("crossplane-system", plugin);
        assert!(validate_secret_store_config(&config).is_err());
    }

    #[test]
    fn publish_to_names_are_checked() {
        let mut publish = PublishConnectionDetailsTo::new("db-conn");
        assert!(validate_publish_connection_details_to(&publish).is_ok());

        publish.secret_store_config_ref = Some(Reference::new("Vault_Store"));
        assert!(validate_publish_connection_details_to(&publish).is_err());

        let publish = PublishConnectionDetailsTo::new("");
        assert!(validate_publish_connection_details_to(&publish).is_err());
    }
}
