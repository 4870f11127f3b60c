//! # SSCTL CLI
//!
//! Command-line interface for secret store configurations.
//!
//! ## Usage
//!
//! ```bash
//! # Check a store config or a connection secret target
//! ssctl validate store-config.yaml
//! ssctl validate --kind publish-to publish.yaml
//!
//! # Resolve a store config against the current cluster and show what was resolved
//! ssctl resolve store-config.yaml --kube
//!
//! # Stamp an owner UID onto a connection secret target
//! ssctl stamp-owner publish.yaml --uid 6f1c2f8e-4b1a-4d7e-9c55-0d1f3c2b7a90
//!
//! # Print the JSON schemas of the API types
//! ssctl schema
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use connection_details::config::ResolverConfig;
use connection_details::observability::init_logging;
use std::path::PathBuf;

mod document;
mod owner;
mod resolve;
mod schema;
mod validate;

/// Secret store configuration CLI
#[derive(Parser)]
#[command(name = "ssctl")]
#[command(about = "Validate and resolve secret store configurations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration document (YAML or JSON)
    Validate {
        /// What the document contains
        #[arg(long, value_enum, default_value_t = DocumentKind::Store)]
        kind: DocumentKind,

        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Resolve a secret store config and print a summary (credential values are never printed)
    Resolve {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Read `Secret` credential sources from the current Kubernetes cluster
        #[arg(long)]
        kube: bool,

        /// Namespace for secret selectors without one (overrides POD_NAMESPACE)
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// Set the owner UID label on a connection secret target and print it
    StampOwner {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// UID of the owning resource
        #[arg(long)]
        uid: String,
    },
    /// Print the JSON schemas of SecretStoreConfig and PublishConnectionDetailsTo
    Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DocumentKind {
    /// SecretStoreConfig
    Store,
    /// PublishConnectionDetailsTo
    PublishTo,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configure rustls crypto provider FIRST, before any other operations
    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        return Err(anyhow::anyhow!("Failed to install rustls crypto provider"));
    }

    let config = ResolverConfig::from_env();
    init_logging(&config).context("Failed to initialize logging")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { kind, file } => validate::validate_command(&file, kind),
        Commands::Resolve {
            file,
            kube,
            namespace,
        } => resolve::resolve_command(&file, kube, namespace, &config).await,
        Commands::StampOwner { file, uid } => owner::stamp_owner_command(&file, &uid),
        Commands::Schema => schema::schema_command(),
    }
}
