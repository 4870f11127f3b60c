//! # Secret Reading
//!
//! Reads Kubernetes secrets for the `Secret` credential source.

use crate::error::ResolveError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::Api;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Data of a secret, keyed by secret key
pub type SecretData = BTreeMap<String, Vec<u8>>;

/// Reads secrets by namespace and name
#[async_trait]
pub trait SecretReader: Send + Sync {
    /// Returns `Ok(None)` when the secret does not exist
    async fn read_secret(&self, namespace: &str, name: &str)
        -> Result<Option<SecretData>, ResolveError>;
}

/// Reads secrets from the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretReader {
    client: kube::Client,
}

impl KubeSecretReader {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for KubeSecretReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretReader").finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretReader for KubeSecretReader {
    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<SecretData>, ResolveError> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        debug!(secret.namespace = namespace, secret.name = name, "Reading secret");

        let secret = secrets
            .get_opt(name)
            .await
            .map_err(|e| ResolveError::read(format!("secret {namespace}/{name}"), e))?;

        Ok(secret.map(|secret| {
            secret
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (key, value.0))
                .collect()
        }))
    }
}

/// Secrets held in memory, keyed by `(namespace, name)`
///
/// Useful where secrets are captured ahead of time, and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretReader {
    secrets: HashMap<(String, String), SecretData>,
}

impl InMemorySecretReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a secret
    #[must_use]
    pub fn with_secret<K, V>(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        data: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let data = data
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.secrets.insert((namespace.into(), name.into()), data);
        self
    }
}

#[async_trait]
impl SecretReader for InMemorySecretReader {
    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<SecretData>, ResolveError> {
        Ok(self
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }
}
