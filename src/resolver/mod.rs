//! # Resolution
//!
//! Resolves credential sources and secret store configurations into the
//! values a backend client needs.
//!
//! ## Module Structure
//!
//! - `credential.rs` - Credential source resolution (`None`, `Secret`, `Environment`, `Filesystem`)
//! - `dispatch.rs` - Secret store dispatch (Kubernetes, Vault, Plugin)
//! - `secret_reader.rs` - Secret-reading collaborator and its Kubernetes implementation
//! - `env.rs` - Environment variable collaborator
//! - `value.rs` - Zeroizing wrapper for resolved values

mod credential;
mod dispatch;
mod env;
mod secret_reader;
mod value;

pub use credential::CredentialResolver;
pub use dispatch::{
    ResolvedKubernetesStore, ResolvedPluginStore, ResolvedStore, ResolvedVaultAuth,
    ResolvedVaultStore,
};
pub use env::{EnvSource, ProcessEnv};
pub use secret_reader::{InMemorySecretReader, KubeSecretReader, SecretData, SecretReader};
pub use value::CredentialValue;
