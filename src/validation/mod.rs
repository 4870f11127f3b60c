//! # Validation
//!
//! Structural checks for store configs and connection secret targets.
//!
//! Resolution does not call these; they let tooling reject a configuration
//! before anything is resolved against it.

mod credentials;
mod kubernetes;
mod store;

pub use credentials::validate_credentials;
pub use kubernetes::{validate_kubernetes_name, validate_kubernetes_namespace};
pub use store::{validate_publish_connection_details_to, validate_secret_store_config};
