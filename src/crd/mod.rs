//! # API Types
//!
//! Configuration types for publishing connection details to a secret store.
//!
//! These types mirror the persisted API: field names are the external
//! contract and round-trip through serialization unchanged.
//!
//! ## Module Structure
//!
//! - `reference.rs` - Named and typed references to other objects
//! - `credentials.rs` - Credential sources and their selectors
//! - `connection.rs` - Connection secret target and metadata (owner tagging)
//! - `store.rs` - Secret store selection (Kubernetes, Vault, Plugin)
//! - `vault.rs` - Vault store and Vault authentication configuration

mod connection;
mod credentials;
mod reference;
mod store;
mod vault;

// Re-export all public types
pub use connection::{ConnectionSecretMetadata, PublishConnectionDetailsTo};
pub use credentials::{
    CaBundle, CommonCredentialSelectors, CredentialUse, CredentialsConfig, CredentialsSource,
    EnvSelector, FsSelector, KubernetesAuthConfig, Kubeconfig, SecretKeySelector,
    ServiceAccountToken, ServiceAccountTokenSourceConfig, VaultAuthTokenConfig,
    VaultCABundleConfig, VaultToken,
};
pub use reference::{Config, Reference};
pub use store::{
    KubernetesSecretStoreConfig, PluginStoreConfig, SecretStore, SecretStoreConfig,
    SecretStoreType,
};
pub use vault::{
    VaultAuthConfig, VaultAuthKubernetesConfig, VaultAuthMethod, VaultKvVersion,
    VaultSecretStoreConfig,
};
