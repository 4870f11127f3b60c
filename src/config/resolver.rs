//! # Resolver Configuration
//!
//! Settings for credential resolution and logging, loaded from environment variables.

use crate::constants::{
    DEFAULT_SECRET_NAMESPACE, DEFAULT_SERVICE_ACCOUNT_TOKEN_PATH, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_POD_NAMESPACE, ENV_SERVICE_ACCOUNT_TOKEN_PATH,
};
use crate::resolver::{EnvSource, ProcessEnv};
use std::path::PathBuf;

/// Resolver configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Namespace for secret selectors that do not name one
    pub default_namespace: String,
    /// Service account token used for Vault Kubernetes auth when no token source is configured
    pub service_account_token_path: PathBuf,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_SECRET_NAMESPACE.to_string(),
            service_account_token_path: PathBuf::from(DEFAULT_SERVICE_ACCOUNT_TOKEN_PATH),
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_env_source(&ProcessEnv)
    }

    /// Load configuration from the given environment with defaults
    pub fn from_env_source(env: &dyn EnvSource) -> Self {
        Self {
            default_namespace: env_var_or_default_str(
                env,
                ENV_POD_NAMESPACE,
                DEFAULT_SECRET_NAMESPACE,
            ),
            service_account_token_path: PathBuf::from(env_var_or_default_str(
                env,
                ENV_SERVICE_ACCOUNT_TOKEN_PATH,
                DEFAULT_SERVICE_ACCOUNT_TOKEN_PATH,
            )),
            log_level: env_var_or_default_str(env, ENV_LOG_LEVEL, "INFO"),
            log_format: env_var_or_default_str(env, ENV_LOG_FORMAT, "text"),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Read environment variable as string or return default
///
/// Empty values count as unset.
fn env_var_or_default_str(env: &dyn EnvSource, key: &str, default: &str) -> String {
    env.var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
