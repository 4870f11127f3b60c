//! # Credential Sources
//!
//! One credential shape reused by every slot that needs a secret value:
//! Kubernetes auth, Vault token auth, Vault CA bundle and the service account
//! token used for Vault Kubernetes auth.
//!
//! The slots share the same wire form (`source` plus the common selectors
//! inlined next to it), so they are a single generic type tagged with a
//! marker describing what the value is used for.

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Where a credential value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum CredentialsSource {
    /// No credential is needed (e.g. anonymous access)
    None,
    /// A key of a Kubernetes secret
    Secret,
    /// A process environment variable
    Environment,
    /// A file on the local filesystem
    Filesystem,
}

impl CredentialsSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialsSource::None => "None",
            CredentialsSource::Secret => "Secret",
            CredentialsSource::Environment => "Environment",
            CredentialsSource::Filesystem => "Filesystem",
        }
    }
}

impl fmt::Display for CredentialsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects a key of a Kubernetes secret
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Namespace of the secret. Falls back to the resolver's namespace when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the secret
    pub name: String,
    /// The key to select
    pub key: String,
}

/// Selects an environment variable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvSelector {
    /// Name is the name of an environment variable
    pub name: String,
}

/// Selects a file on the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FsSelector {
    /// Path is a filesystem path
    pub path: String,
}

/// Locators for every credential source
///
/// Only the selector matching the chosen source is read. The others may be
/// present and are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonCredentialSelectors {
    /// Fs is a reference to a filesystem location that contains credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsSelector>,
    /// Env is a reference to an environment variable that contains credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSelector>,
    /// A SecretRef is a reference to a secret key that contains the credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretKeySelector>,
}

/// What a credential slot is used for
pub trait CredentialUse {
    /// Schema name of the slot, matching the API type it replaces
    const SCHEMA_NAME: &'static str;
    /// Short label used in logs and error messages
    const LABEL: &'static str;
    /// Schema description
    const DESCRIPTION: &'static str;
}

/// Credentials for the Kubernetes API of a Kubernetes secret store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kubeconfig;

impl CredentialUse for Kubeconfig {
    const SCHEMA_NAME: &'static str = "KubernetesAuthConfig";
    const LABEL: &'static str = "kubernetes auth";
    const DESCRIPTION: &'static str =
        "Credentials used to connect to the Kubernetes API. Expects a kubeconfig.";
}

/// Token for Vault token auth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaultToken;

impl CredentialUse for VaultToken {
    const SCHEMA_NAME: &'static str = "VaultAuthTokenConfig";
    const LABEL: &'static str = "vault token";
    const DESCRIPTION: &'static str = "Configuration for Vault Token Auth Method.";
}

/// CA bundle trusted when talking to the Vault server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaBundle;

impl CredentialUse for CaBundle {
    const SCHEMA_NAME: &'static str = "VaultCABundleConfig";
    const LABEL: &'static str = "vault ca bundle";
    const DESCRIPTION: &'static str = "Configuration for a CA bundle of the Vault server.";
}

/// Service account token presented to Vault Kubernetes auth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceAccountToken;

impl CredentialUse for ServiceAccountToken {
    const SCHEMA_NAME: &'static str = "ServiceAccountTokenSourceConfig";
    const LABEL: &'static str = "service account token";
    const DESCRIPTION: &'static str = "Where to retrieve the Service Account Token from.";
}

/// A credential source paired with its selectors
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CredentialsConfig<U> {
    /// Source of the credentials
    pub source: CredentialsSource,
    /// Selectors for extracting credentials, inlined next to `source`
    #[serde(flatten)]
    pub selectors: CommonCredentialSelectors,
    #[serde(skip)]
    purpose: PhantomData<U>,
}

/// Credentials used to connect to the Kubernetes API
pub type KubernetesAuthConfig = CredentialsConfig<Kubeconfig>;
/// Configuration for Vault Token Auth Method
pub type VaultAuthTokenConfig = CredentialsConfig<VaultToken>;
/// Configuration for the Vault server CA bundle
pub type VaultCABundleConfig = CredentialsConfig<CaBundle>;
/// Configuration to retrieve a Service Account Token
pub type ServiceAccountTokenSourceConfig = CredentialsConfig<ServiceAccountToken>;

impl<U> CredentialsConfig<U> {
    pub fn new(source: CredentialsSource, selectors: CommonCredentialSelectors) -> Self {
        Self {
            source,
            selectors,
            purpose: PhantomData,
        }
    }

    /// No credential
    pub fn none() -> Self {
        Self::new(CredentialsSource::None, CommonCredentialSelectors::default())
    }

    /// Read the credential from a key of a Kubernetes secret
    pub fn secret(selector: SecretKeySelector) -> Self {
        Self::new(
            CredentialsSource::Secret,
            CommonCredentialSelectors {
                secret_ref: Some(selector),
                ..Default::default()
            },
        )
    }

    /// Read the credential from an environment variable
    pub fn environment(name: impl Into<String>) -> Self {
        Self::new(
            CredentialsSource::Environment,
            CommonCredentialSelectors {
                env: Some(EnvSelector { name: name.into() }),
                ..Default::default()
            },
        )
    }

    /// Read the credential from a file
    pub fn filesystem(path: impl Into<String>) -> Self {
        Self::new(
            CredentialsSource::Filesystem,
            CommonCredentialSelectors {
                fs: Some(FsSelector { path: path.into() }),
                ..Default::default()
            },
        )
    }
}

impl<U: CredentialUse> CredentialsConfig<U> {
    /// What this credential is for, e.g. "vault token"
    #[must_use]
    pub fn label(&self) -> &'static str {
        U::LABEL
    }
}

impl<U> Clone for CredentialsConfig<U> {
    fn clone(&self) -> Self {
        Self::new(self.source, self.selectors.clone())
    }
}

impl<U> PartialEq for CredentialsConfig<U> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.selectors == other.selectors
    }
}

impl<U> Eq for CredentialsConfig<U> {}

impl<U: CredentialUse> fmt::Debug for CredentialsConfig<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(U::SCHEMA_NAME)
            .field("source", &self.source)
            .field("selectors", &self.selectors)
            .finish()
    }
}

impl<U: CredentialUse> JsonSchema for CredentialsConfig<U> {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed(U::SCHEMA_NAME)
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "description": U::DESCRIPTION,
            "properties": {
                "source": {
                    "type": "string",
                    "enum": ["None", "Secret", "Environment", "Filesystem"],
                    "description": "Source of the credentials."
                },
                "fs": generator.subschema_for::<FsSelector>(),
                "env": generator.subschema_for::<EnvSelector>(),
                "secretRef": generator.subschema_for::<SecretKeySelector>()
            },
            "required": ["source"]
        })
    }
}
