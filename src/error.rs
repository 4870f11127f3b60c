//! # Errors
//!
//! Resolution errors, classified so callers can tell "fix the configuration"
//! apart from "retry the operation".

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a [`ResolveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The configuration is unusable as written. Never retried.
    InvalidConfig,
    /// A referenced secret, key or environment variable does not exist
    NotFound,
    /// Reading a file or contacting a collaborator failed, possibly transiently
    ReadError,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidConfig => "invalid-config",
            ErrorKind::NotFound => "not-found",
            ErrorKind::ReadError => "read-error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("secret {namespace}/{name} not found")]
    SecretNotFound { namespace: String, name: String },

    #[error("key {key} not found in secret {namespace}/{name}")]
    KeyNotFound {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("environment variable {0} is not set")]
    EnvNotFound(String),

    #[error("failed to read {target}: {source}")]
    ReadError {
        target: String,
        #[source]
        source: BoxError,
    },
}

impl ResolveError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        ResolveError::InvalidConfig(message.into())
    }

    pub(crate) fn read(
        target: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ResolveError::ReadError {
            target: target.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            ResolveError::SecretNotFound { .. }
            | ResolveError::KeyNotFound { .. }
            | ResolveError::EnvNotFound(_) => ErrorKind::NotFound,
            ResolveError::ReadError { .. } => ErrorKind::ReadError,
        }
    }

    /// Whether retrying without changing anything could succeed
    ///
    /// Not-found errors need operator intervention first and invalid
    /// configuration never resolves on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::ReadError
    }
}
