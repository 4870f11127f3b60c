//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use connection_details::prelude::*;
//! ```

// API types - most commonly used
pub use crate::crd::*;

// Resolution
pub use crate::resolver::{
    CredentialResolver, CredentialValue, EnvSource, InMemorySecretReader, KubeSecretReader,
    ResolvedStore, ResolvedVaultAuth, SecretReader,
};

// Config types
pub use crate::config::ResolverConfig;

// Common error types
pub use crate::error::{ErrorKind, ResolveError};

pub use crate::constants::LABEL_KEY_OWNER_UID;
