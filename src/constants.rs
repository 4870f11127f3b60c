//! # Constants
//!
//! Shared constants used throughout the crate.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Label key holding the UID of the resource that owns a connection secret.
///
/// Owner references only work for in-cluster Kubernetes secrets, so ownership
/// is tracked through a label that every secret store implementation can set
/// and read back.
pub const LABEL_KEY_OWNER_UID: &str = "secret.crossplane.io/owner-uid";

/// Name of the store config referenced when `configRef` is omitted
pub const DEFAULT_STORE_CONFIG_NAME: &str = "default";

/// Path where Kubernetes mounts the pod's service account token
pub const DEFAULT_SERVICE_ACCOUNT_TOKEN_PATH: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Namespace used for secret selectors that do not name one
pub const DEFAULT_SECRET_NAMESPACE: &str = "crossplane-system";

/// Mount path of the Kubernetes auth method in Vault when none is configured
pub const DEFAULT_VAULT_KUBERNETES_MOUNT_PATH: &str = "kubernetes";

/// Environment variable overriding the fallback secret namespace
pub const ENV_POD_NAMESPACE: &str = "POD_NAMESPACE";

/// Environment variable overriding the service account token path
pub const ENV_SERVICE_ACCOUNT_TOKEN_PATH: &str = "SERVICE_ACCOUNT_TOKEN_PATH";

/// Environment variable for the global log level
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Environment variable for the log format (json, text)
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
