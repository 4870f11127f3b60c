//! Connection Details Library
//!
//! Configuration model deciding where a resource's connection details are
//! published and how to authenticate to the chosen secret store, plus the
//! resolution of that configuration into usable credentials.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use connection_details::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run(config: SecretStoreConfig) -> Result<(), ResolveError> {
//! let resolver = CredentialResolver::new(Arc::new(InMemorySecretReader::new()));
//! let store = resolver.resolve_store(&config).await?;
//! println!("using {} store", store.store_type());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod crd;
pub mod error;
pub mod observability;
pub mod prelude;
pub mod resolver;
pub mod validation;
