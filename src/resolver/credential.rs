//! # Credential Resolution
//!
//! Turns a credential source plus its selectors into the credential bytes.
//!
//! Resolution performs no caching and no retries; callers that need either
//! wrap it themselves.

use crate::config::ResolverConfig;
use crate::crd::{
    CommonCredentialSelectors, CredentialUse, CredentialsConfig, CredentialsSource,
    SecretKeySelector,
};
use crate::error::ResolveError;
use crate::resolver::{CredentialValue, EnvSource, ProcessEnv, SecretReader};
use std::env::VarError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Resolves credential sources against its collaborators
#[derive(Clone)]
pub struct CredentialResolver {
    secrets: Arc<dyn SecretReader>,
    env: Arc<dyn EnvSource>,
    pub(crate) default_namespace: String,
    pub(crate) service_account_token_path: PathBuf,
}

impl CredentialResolver {
    /// Resolver reading the process environment, with default settings
    pub fn new(secrets: Arc<dyn SecretReader>) -> Self {
        Self::from_config(secrets, &ResolverConfig::default())
    }

    pub fn from_config(secrets: Arc<dyn SecretReader>, config: &ResolverConfig) -> Self {
        Self {
            secrets,
            env: Arc::new(ProcessEnv),
            default_namespace: config.default_namespace.clone(),
            service_account_token_path: config.service_account_token_path.clone(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_service_account_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_account_token_path = path.into();
        self
    }

    /// Resolve one credential slot
    pub async fn resolve<U: CredentialUse>(
        &self,
        config: &CredentialsConfig<U>,
    ) -> Result<CredentialValue, ResolveError> {
        self.resolve_source(config.source, &config.selectors, U::LABEL)
            .await
    }

    /// Resolve a source using the selector that matches it
    ///
    /// Selectors for other sources are ignored. `label` names the credential
    /// in logs and error messages.
    pub async fn resolve_source(
        &self,
        source: CredentialsSource,
        selectors: &CommonCredentialSelectors,
        label: &str,
    ) -> Result<CredentialValue, ResolveError> {
        debug!(credential = label, source = %source, "Resolving credential");
        match source {
            CredentialsSource::None => Ok(CredentialValue::empty()),
            CredentialsSource::Secret => {
                let selector = selectors.secret_ref.as_ref().ok_or_else(|| {
                    missing_selector(label, source, "secretRef")
                })?;
                self.read_secret_key(selector).await
            }
            CredentialsSource::Environment => {
                let selector = selectors
                    .env
                    .as_ref()
                    .ok_or_else(|| missing_selector(label, source, "env"))?;
                self.read_env(&selector.name)
            }
            CredentialsSource::Filesystem => {
                let selector = selectors
                    .fs
                    .as_ref()
                    .ok_or_else(|| missing_selector(label, source, "fs"))?;
                read_file(Path::new(&selector.path)).await
            }
        }
    }

    async fn read_secret_key(
        &self,
        selector: &SecretKeySelector,
    ) -> Result<CredentialValue, ResolveError> {
        let namespace = selector
            .namespace
            .as_deref()
            .unwrap_or(&self.default_namespace);

        let data = self
            .secrets
            .read_secret(namespace, &selector.name)
            .await?
            .ok_or_else(|| ResolveError::SecretNotFound {
                namespace: namespace.to_string(),
                name: selector.name.clone(),
            })?;

        data.get(&selector.key)
            .map(|value| CredentialValue::new(value.clone()))
            .ok_or_else(|| ResolveError::KeyNotFound {
                namespace: namespace.to_string(),
                name: selector.name.clone(),
                key: selector.key.clone(),
            })
    }

    fn read_env(&self, name: &str) -> Result<CredentialValue, ResolveError> {
        match self.env.var(name) {
            Ok(value) => Ok(CredentialValue::from(value)),
            Err(VarError::NotPresent) => Err(ResolveError::EnvNotFound(name.to_string())),
            Err(e @ VarError::NotUnicode(_)) => {
                Err(ResolveError::read(format!("environment variable {name}"), e))
            }
        }
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("default_namespace", &self.default_namespace)
            .field("service_account_token_path", &self.service_account_token_path)
            .finish_non_exhaustive()
    }
}

/// Read the full contents of a file
pub(crate) async fn read_file(path: &Path) -> Result<CredentialValue, ResolveError> {
    tokio::fs::read(path)
        .await
        .map(CredentialValue::new)
        .map_err(|e| ResolveError::read(path.display().to_string(), e))
}

fn missing_selector(label: &str, source: CredentialsSource, selector: &str) -> ResolveError {
    ResolveError::invalid_config(format!(
        "{label} source is {source} but no {selector} selector is set"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::VaultAuthTokenConfig;
    use crate::error::ErrorKind;
    use crate::resolver::InMemorySecretReader;
    use std::collections::HashMap;
    use std::io::Write;

    fn resolver() -> CredentialResolver {
        let secrets = InMemorySecretReader::new()
            .with_secret("crossplane-system", "vault-token", [("token", "s.abc123")])
            .with_secret("team-a", "vault-token", [("token", "s.team-a")]);
        let env: HashMap<String, String> = [
            ("VAULT_TOKEN".to_string(), "s.env".to_string()),
            ("EMPTY_TOKEN".to_string(), String::new()),
        ]
        .into_iter()
        .collect();
        CredentialResolver::new(Arc::new(secrets)).with_env(Arc::new(env))
    }

    fn selector(namespace: Option<&str>, name: &str, key: &str) -> SecretKeySelector {
        SecretKeySelector {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn none_source_is_empty() {
        let value = resolver()
            .resolve(&VaultAuthTokenConfig::none())
            .await
            .unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn none_source_ignores_other_selectors() {
        let mut config = VaultAuthTokenConfig::environment("MISSING");
        config.source = CredentialsSource::None;
        assert!(resolver().resolve(&config).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn secret_source_reads_key() {
        let config = VaultAuthTokenConfig::secret(selector(
            Some("team-a"),
            "vault-token",
            "token",
        ));
        let value = resolver().resolve(&config).await.unwrap();
        assert_eq!(value.as_bytes(), b"s.team-a");
    }

    #[tokio::test]
    async fn secret_source_falls_back_to_default_namespace() {
        let config = VaultAuthTokenConfig::secret(selector(None, "vault-token", "token"));
        let value = resolver().resolve(&config).await.unwrap();
        assert_eq!(value.as_bytes(), b"s.abc123");
    }

    #[tokio::test]
    async fn missing_secret_is_not_found() {
        let config = VaultAuthTokenConfig::secret(selector(None, "absent", "token"));
        let err = resolver().resolve(&config).await.unwrap_err();
        assert!(matches!(err, ResolveError::SecretNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn missing_key_is_key_not_found() {
        let config = VaultAuthTokenConfig::secret(selector(None, "vault-token", "password"));
        let err = resolver().resolve(&config).await.unwrap_err();
        assert!(matches!(err, ResolveError::KeyNotFound { ref key, .. } if key == "password"));
    }

    #[tokio::test]
    async fn environment_source_reads_variable() {
        let value = resolver()
            .resolve(&VaultAuthTokenConfig::environment("VAULT_TOKEN"))
            .await
            .unwrap();
        assert_eq!(value.as_str().unwrap(), "s.env");
    }

    #[tokio::test]
    async fn environment_source_keeps_explicit_empty_value() {
        let value = resolver()
            .resolve(&VaultAuthTokenConfig::environment("EMPTY_TOKEN"))
            .await
            .unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn unset_environment_variable_is_not_found() {
        let err = resolver()
            .resolve(&VaultAuthTokenConfig::environment("UNSET_TOKEN"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::EnvNotFound(ref name) if name == "UNSET_TOKEN"));
    }

    #[tokio::test]
    async fn filesystem_source_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"-----BEGIN CERTIFICATE-----\nabc\n").unwrap();
        let config = VaultAuthTokenConfig::filesystem(file.path().to_string_lossy());
        let value = resolver().resolve(&config).await.unwrap();
        assert_eq!(value.as_bytes(), b"-----BEGIN CERTIFICATE-----\nabc\n");
    }

    #[tokio::test]
    async fn unreadable_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-token");
        let config = VaultAuthTokenConfig::filesystem(path.to_string_lossy());
        let err = resolver().resolve(&config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadError);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn missing_selector_is_invalid_config() {
        let config = VaultAuthTokenConfig::new(
            CredentialsSource::Environment,
            CommonCredentialSelectors::default(),
        );
        let err = resolver().resolve(&config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(err.to_string().contains("vault token"));
        assert!(err.to_string().contains("env"));
    }
}
