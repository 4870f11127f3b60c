//! # Secret Store Dispatch
//!
//! Resolves a [`SecretStoreConfig`] into the selected backend plus the
//! credential material its client needs.
//!
//! The first resolution failure aborts the whole dispatch. Transient backend
//! errors and retries belong to the client each branch is handed to.

use crate::constants::DEFAULT_VAULT_KUBERNETES_MOUNT_PATH;
use crate::crd::{
    KubernetesSecretStoreConfig, PluginStoreConfig, SecretStore, SecretStoreConfig,
    SecretStoreType, VaultAuthConfig, VaultAuthKubernetesConfig, VaultAuthMethod, VaultKvVersion,
    VaultSecretStoreConfig,
};
use crate::error::ResolveError;
use crate::resolver::credential::read_file;
use crate::resolver::{CredentialResolver, CredentialValue};
use tracing::{debug, info};

/// A secret store with its authentication material resolved
#[derive(Debug)]
pub enum ResolvedStore {
    Kubernetes(ResolvedKubernetesStore),
    Vault(ResolvedVaultStore),
    Plugin(ResolvedPluginStore),
}

impl ResolvedStore {
    #[must_use]
    pub fn store_type(&self) -> SecretStoreType {
        match self {
            ResolvedStore::Kubernetes(_) => SecretStoreType::Kubernetes,
            ResolvedStore::Vault(_) => SecretStoreType::Vault,
            ResolvedStore::Plugin(_) => SecretStoreType::Plugin,
        }
    }

    #[must_use]
    pub fn default_scope(&self) -> &str {
        match self {
            ResolvedStore::Kubernetes(store) => &store.default_scope,
            ResolvedStore::Vault(store) => &store.default_scope,
            ResolvedStore::Plugin(store) => &store.default_scope,
        }
    }
}

/// Kubernetes store: the default namespace and the kubeconfig to connect with
#[derive(Debug)]
pub struct ResolvedKubernetesStore {
    pub default_scope: String,
    /// Empty when the source is `None` or no block is configured, meaning in-cluster config
    pub kubeconfig: CredentialValue,
}

/// Vault store: server coordinates, trust bundle and auth material
#[derive(Debug)]
pub struct ResolvedVaultStore {
    /// Default parent path for cluster-scoped resources
    pub default_scope: String,
    pub server: String,
    pub namespace: Option<String>,
    pub mount_path: String,
    pub version: VaultKvVersion,
    pub ca_bundle: Option<CredentialValue>,
    pub auth: ResolvedVaultAuth,
}

#[derive(Debug)]
pub enum ResolvedVaultAuth {
    Token(CredentialValue),
    Kubernetes {
        role: String,
        mount_path: String,
        service_account_token: CredentialValue,
    },
}

impl ResolvedVaultAuth {
    #[must_use]
    pub fn method(&self) -> VaultAuthMethod {
        match self {
            ResolvedVaultAuth::Token(_) => VaultAuthMethod::Token,
            ResolvedVaultAuth::Kubernetes { .. } => VaultAuthMethod::Kubernetes,
        }
    }
}

/// Plugin store: passed through unresolved, the plugin authenticates itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPluginStore {
    pub default_scope: String,
    pub config: PluginStoreConfig,
}

impl CredentialResolver {
    /// Resolve the selected backend of a store config
    pub async fn resolve_store(
        &self,
        config: &SecretStoreConfig,
    ) -> Result<ResolvedStore, ResolveError> {
        let store_type = config.store_type();
        info!(
            store.type = %store_type,
            store.default_scope = %config.default_scope,
            "Resolving secret store configuration"
        );

        let default_scope = config.default_scope.clone();
        let resolved = match &config.store {
            SecretStore::Kubernetes(Some(kubernetes)) => {
                ResolvedStore::Kubernetes(self.resolve_kubernetes(default_scope, kubernetes).await?)
            }
            SecretStore::Kubernetes(None) => {
                debug!("No Kubernetes configuration block, using in-cluster config");
                ResolvedStore::Kubernetes(ResolvedKubernetesStore {
                    default_scope,
                    kubeconfig: CredentialValue::empty(),
                })
            }
            SecretStore::Vault(vault) => {
                let vault = selected_block(vault.as_ref(), store_type)?;
                ResolvedStore::Vault(self.resolve_vault(default_scope, vault).await?)
            }
            SecretStore::Plugin(plugin) => {
                let plugin = selected_block(plugin.as_ref(), store_type)?;
                debug!(
                    plugin.endpoint = %plugin.endpoint,
                    plugin.config = %plugin.config_ref.name,
                    "Delegating authentication to secret store plugin"
                );
                ResolvedStore::Plugin(ResolvedPluginStore {
                    default_scope,
                    config: plugin.clone(),
                })
            }
        };

        debug!(store.type = %store_type, "Resolved secret store configuration");
        Ok(resolved)
    }

    async fn resolve_kubernetes(
        &self,
        default_scope: String,
        config: &KubernetesSecretStoreConfig,
    ) -> Result<ResolvedKubernetesStore, ResolveError> {
        let kubeconfig = self.resolve(&config.auth).await?;
        Ok(ResolvedKubernetesStore {
            default_scope,
            kubeconfig,
        })
    }

    async fn resolve_vault(
        &self,
        default_scope: String,
        config: &VaultSecretStoreConfig,
    ) -> Result<ResolvedVaultStore, ResolveError> {
        let ca_bundle = match &config.ca_bundle {
            Some(ca_bundle) => Some(self.resolve(ca_bundle).await?),
            None => None,
        };
        let auth = self.resolve_vault_auth(&config.auth).await?;

        Ok(ResolvedVaultStore {
            default_scope,
            server: config.server.clone(),
            namespace: Some(config.namespace.clone()).filter(|ns| !ns.is_empty()),
            mount_path: config.mount_path.clone(),
            version: config.effective_version(),
            ca_bundle,
            auth,
        })
    }

    /// Resolve the Vault authentication method
    pub async fn resolve_vault_auth(
        &self,
        auth: &VaultAuthConfig,
    ) -> Result<ResolvedVaultAuth, ResolveError> {
        let method = auth.method();
        debug!(vault.auth.method = %method, "Resolving Vault authentication");
        match auth {
            VaultAuthConfig::Token(token) => {
                let token = token.as_ref().ok_or_else(|| missing_block(method))?;
                Ok(ResolvedVaultAuth::Token(self.resolve(token).await?))
            }
            VaultAuthConfig::Kubernetes(kubernetes) => {
                let kubernetes = kubernetes.as_ref().ok_or_else(|| missing_block(method))?;
                self.resolve_vault_kubernetes_auth(kubernetes).await
            }
        }
    }

    async fn resolve_vault_kubernetes_auth(
        &self,
        config: &VaultAuthKubernetesConfig,
    ) -> Result<ResolvedVaultAuth, ResolveError> {
        let service_account_token = match &config.service_account_token_source {
            Some(source) => self.resolve(source).await?,
            None => {
                debug!(
                    path = %self.service_account_token_path.display(),
                    "Reading mounted service account token"
                );
                read_file(&self.service_account_token_path).await?
            }
        };

        let mount_path = if config.mount_path.is_empty() {
            DEFAULT_VAULT_KUBERNETES_MOUNT_PATH.to_string()
        } else {
            config.mount_path.clone()
        };

        Ok(ResolvedVaultAuth::Kubernetes {
            role: config.role.clone(),
            mount_path,
            service_account_token,
        })
    }
}

fn selected_block<T>(block: Option<&T>, store_type: SecretStoreType) -> Result<&T, ResolveError> {
    block.ok_or_else(|| {
        ResolveError::invalid_config(format!(
            "{store_type} selected but no matching configuration block present"
        ))
    })
}

fn missing_block(method: VaultAuthMethod) -> ResolveError {
    ResolveError::invalid_config(format!(
        "Vault auth method {method} selected but no matching configuration block present"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{Config, KubernetesAuthConfig, VaultAuthTokenConfig};
    use crate::error::ErrorKind;
    use crate::resolver::InMemorySecretReader;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn resolver() -> CredentialResolver {
        let env: HashMap<String, String> =
            [("VAULT_TOKEN".to_string(), "s.token".to_string())].into_iter().collect();
        CredentialResolver::new(Arc::new(InMemorySecretReader::new())).with_env(Arc::new(env))
    }

    fn vault_config(auth: VaultAuthConfig) -> VaultSecretStoreConfig {
        VaultSecretStoreConfig {
            server: "https://vault.acme.org".to_string(),
            namespace: String::new(),
            mount_path: "secret/".to_string(),
            version: None,
            ca_bundle: None,
            auth,
        }
    }

    #[tokio::test]
    async fn kubernetes_store_resolves_auth() {
        let config = SecretStoreConfig::kubernetes(
            "crossplane-system",
            KubernetesSecretStoreConfig {
                auth: KubernetesAuthConfig::none(),
            },
        );
        let resolved = resolver().resolve_store(&config).await.unwrap();
        assert_eq!(resolved.store_type(), SecretStoreType::Kubernetes);
        assert_eq!(resolved.default_scope(), "crossplane-system");
        match resolved {
            ResolvedStore::Kubernetes(store) => assert!(store.kubeconfig.is_empty()),
            other => panic!("Expected Kubernetes store, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn kubernetes_store_without_block_uses_in_cluster_config() {
        let config = SecretStoreConfig {
            default_scope: "crossplane-system".to_string(),
            store: SecretStore::Kubernetes(None),
        };
        match resolver().resolve_store(&config).await.unwrap() {
            ResolvedStore::Kubernetes(store) => {
                assert_eq!(store.default_scope, "crossplane-system");
                assert!(store.kubeconfig.is_empty());
            }
            other => panic!("Expected Kubernetes store, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn selected_type_without_block_is_invalid_config() {
        for store in [SecretStore::Vault(None), SecretStore::Plugin(None)] {
            let store_type = store.store_type();
            let config = SecretStoreConfig {
                default_scope: "crossplane-system".to_string(),
                store,
            };
            let err = resolver().resolve_store(&config).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig);
            assert!(err
                .to_string()
                .contains(&format!("{store_type} selected but no matching configuration block present")));
        }
    }

    #[tokio::test]
    async fn vault_token_auth_resolves_token() {
        let config = SecretStoreConfig::vault(
            "crossplane-system",
            vault_config(VaultAuthConfig::Token(Some(VaultAuthTokenConfig::environment(
                "VAULT_TOKEN",
            )))),
        );
        match resolver().resolve_store(&config).await.unwrap() {
            ResolvedStore::Vault(store) => {
                assert_eq!(store.version, VaultKvVersion::V2);
                assert!(store.namespace.is_none());
                assert!(store.ca_bundle.is_none());
                match store.auth {
                    ResolvedVaultAuth::Token(token) => assert_eq!(token.as_bytes(), b"s.token"),
                    other => panic!("Expected token auth, got {other:?}"),
                }
            }
            other => panic!("Expected Vault store, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn vault_auth_method_without_block_is_invalid_config() {
        let err = resolver()
            .resolve_vault_auth(&VaultAuthConfig::Token(None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[tokio::test]
    async fn vault_kubernetes_auth_defaults_token_path_and_mount_path() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token");
        std::fs::write(&token_path, "eyJhbGciOi.sa").unwrap();

        let resolver = resolver().with_service_account_token_path(&token_path);
        let auth = VaultAuthConfig::Kubernetes(Some(VaultAuthKubernetesConfig {
            role: "r".to_string(),
            mount_path: String::new(),
            service_account_token_source: None,
        }));

        match resolver.resolve_vault_auth(&auth).await.unwrap() {
            ResolvedVaultAuth::Kubernetes {
                role,
                mount_path,
                service_account_token,
            } => {
                assert_eq!(role, "r");
                assert_eq!(mount_path, "kubernetes");
                assert_eq!(service_account_token.as_bytes(), b"eyJhbGciOi.sa");
            }
            other => panic!("Expected Kubernetes auth, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failing_ca_bundle_aborts_dispatch() {
        let mut vault = vault_config(VaultAuthConfig::Token(Some(
            VaultAuthTokenConfig::environment("VAULT_TOKEN"),
        )));
        vault.ca_bundle = Some(crate::crd::VaultCABundleConfig::environment("MISSING_CA"));
        let config = SecretStoreConfig::vault("crossplane-system", vault);

        let err = resolver().resolve_store(&config).await.unwrap_err();
        assert!(matches!(err, ResolveError::EnvNotFound(ref name) if name == "MISSING_CA"));
    }

    #[tokio::test]
    async fn plugin_store_is_passed_through() {
        let plugin = PluginStoreConfig {
            endpoint: "e".to_string(),
            config_ref: Config {
                api_version: "a".to_string(),
                kind: "k".to_string(),
                name: "n".to_string(),
            },
        };
        let config = SecretStoreConfig::plugin("crossplane-system", plugin.clone());
        match resolver().resolve_store(&config).await.unwrap() {
            ResolvedStore::Plugin(store) => assert_eq!(store.config, plugin),
            other => panic!("Expected plugin store, got {other:?}"),
        }
    }
}
