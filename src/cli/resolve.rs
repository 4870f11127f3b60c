//! Resolve command
//!
//! Resolves a store config the way a controller would before handing it to a
//! backend client, then prints what was resolved. Credential bytes are only
//! summarised by length.

use super::document;
use anyhow::{Context, Result};
use connection_details::config::ResolverConfig;
use connection_details::crd::SecretStoreConfig;
use connection_details::resolver::{
    CredentialResolver, CredentialValue, InMemorySecretReader, KubeSecretReader, ResolvedStore,
    ResolvedVaultAuth, SecretReader,
};
use kube::Client;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn resolve_command(
    file: &Path,
    kube: bool,
    namespace: Option<String>,
    config: &ResolverConfig,
) -> Result<()> {
    let store_config: SecretStoreConfig = document::load(file)?;

    let secrets: Arc<dyn SecretReader> = if kube {
        let client = Client::try_default()
            .await
            .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;
        Arc::new(KubeSecretReader::new(client))
    } else {
        info!("No cluster access requested; Secret credential sources will not be found");
        Arc::new(InMemorySecretReader::new())
    };

    let mut resolver = CredentialResolver::from_config(secrets, config);
    if let Some(namespace) = namespace {
        resolver = resolver.with_default_namespace(namespace);
    }

    let resolved = match resolver.resolve_store(&store_config).await {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(error.kind = e.kind().as_str(), retryable = e.is_retryable(), "Resolution failed");
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to resolve {}", file.display())));
        }
    };

    let output = serde_json::to_string_pretty(&summarize(&resolved))
        .context("Failed to serialize resolution summary")?;
    println!("{output}");
    Ok(())
}

fn summarize(resolved: &ResolvedStore) -> Value {
    match resolved {
        ResolvedStore::Kubernetes(store) => json!({
            "type": "Kubernetes",
            "defaultScope": store.default_scope,
            "kubeconfig": describe(&store.kubeconfig),
        }),
        ResolvedStore::Vault(store) => {
            let auth = match &store.auth {
                ResolvedVaultAuth::Token(token) => json!({
                    "method": "Token",
                    "token": describe(token),
                }),
                ResolvedVaultAuth::Kubernetes {
                    role,
                    mount_path,
                    service_account_token,
                } => json!({
                    "method": "Kubernetes",
                    "role": role,
                    "mountPath": mount_path,
                    "serviceAccountToken": describe(service_account_token),
                }),
            };
            json!({
                "type": "Vault",
                "defaultScope": store.default_scope,
                "server": store.server,
                "namespace": store.namespace,
                "mountPath": store.mount_path,
                "version": store.version,
                "caBundle": store.ca_bundle.as_ref().map(describe),
                "auth": auth,
            })
        }
        ResolvedStore::Plugin(store) => json!({
            "type": "Plugin",
            "defaultScope": store.default_scope,
            "endpoint": store.config.endpoint,
            "configRef": store.config.config_ref,
        }),
    }
}

fn describe(value: &CredentialValue) -> Value {
    if value.is_empty() {
        json!("<empty>")
    } else {
        json!(format!("<{} bytes>", value.len()))
    }
}
