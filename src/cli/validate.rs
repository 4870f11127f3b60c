//! Validate command

use super::{document, DocumentKind};
use anyhow::{Context, Result};
use connection_details::crd::{PublishConnectionDetailsTo, SecretStoreConfig};
use connection_details::validation::{
    validate_publish_connection_details_to, validate_secret_store_config,
};
use std::path::Path;

pub fn validate_command(file: &Path, kind: DocumentKind) -> Result<()> {
    match kind {
        DocumentKind::Store => {
            let config: SecretStoreConfig = document::load(file)?;
            validate_secret_store_config(&config)
                .with_context(|| format!("{} is not a valid store config", file.display()))?;
            println!("✅ {} store config is valid", config.store_type());
        }
        DocumentKind::PublishTo => {
            let publish: PublishConnectionDetailsTo = document::load(file)?;
            validate_publish_connection_details_to(&publish).with_context(|| {
                format!("{} is not a valid connection secret target", file.display())
            })?;
            println!(
                "✅ connection secret '{}' is valid (store config: {})",
                publish.name,
                publish.config_ref_or_default().name
            );
        }
    }
    Ok(())
}
