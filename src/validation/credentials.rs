//! # Credential Validation
//!
//! Checks that a credential slot carries the selector its source needs.

use crate::crd::{CredentialUse, CredentialsConfig, CredentialsSource};
use anyhow::Result;

/// Validate a credential slot
///
/// Selectors for sources other than the chosen one are not checked.
pub fn validate_credentials<U: CredentialUse>(
    config: &CredentialsConfig<U>,
    field_name: &str,
) -> Result<()> {
    let selectors = &config.selectors;
    match config.source {
        CredentialsSource::None => {}
        CredentialsSource::Secret => {
            let secret_ref = selectors.secret_ref.as_ref().ok_or_else(|| {
                anyhow::anyhow!("{field_name}.secretRef is required when source is Secret")
            })?;
            if secret_ref.name.is_empty() {
                return Err(anyhow::anyhow!("{field_name}.secretRef.name cannot be empty"));
            }
            if secret_ref.key.is_empty() {
                return Err(anyhow::anyhow!("{field_name}.secretRef.key cannot be empty"));
            }
        }
        CredentialsSource::Environment => {
            let env = selectors.env.as_ref().ok_or_else(|| {
                anyhow::anyhow!("{field_name}.env is required when source is Environment")
            })?;
            if env.name.is_empty() {
                return Err(anyhow::anyhow!("{field_name}.env.name cannot be empty"));
            }
        }
        CredentialsSource::Filesystem => {
            let fs = selectors.fs.as_ref().ok_or_else(|| {
                anyhow::anyhow!("{field_name}.fs is required when source is Filesystem")
            })?;
            if fs.path.is_empty() {
                return Err(anyhow::anyhow!("{field_name}.fs.path cannot be empty"));
            }
        }
    }
    Ok(())
}
