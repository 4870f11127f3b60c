//! # Logging
//!
//! tracing-subscriber initialisation for the CLI.
//!
//! `RUST_LOG` takes precedence; otherwise the configured `LOG_LEVEL` applies
//! to this crate.

use crate::config::ResolverConfig;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &ResolverConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(&config.log_level).into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json_logs() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// Filter directive for this crate at the configured level
fn default_directive(log_level: &str) -> String {
    let level = match log_level.to_ascii_uppercase().as_str() {
        "ERROR" => "error",
        "WARN" => "warn",
        "DEBUG" => "debug",
        "TRACE" => "trace",
        _ => "info",
    };
    format!("connection_details={level},ssctl={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_maps_levels() {
        assert_eq!(
            default_directive("DEBUG"),
            "connection_details=debug,ssctl=debug"
        );
        assert_eq!(default_directive("warn"), "connection_details=warn,ssctl=warn");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(
            default_directive("VERBOSE"),
            "connection_details=info,ssctl=info"
        );
    }
}
