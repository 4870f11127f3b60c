//! Stamp-owner command

use super::document;
use anyhow::{Context, Result};
use connection_details::crd::PublishConnectionDetailsTo;
use std::path::Path;

pub fn stamp_owner_command(file: &Path, uid: &str) -> Result<()> {
    let mut publish: PublishConnectionDetailsTo = document::load(file)?;
    publish.set_owner_uid(uid);
    let yaml = serde_yaml::to_string(&publish).context("Failed to serialize connection secret target")?;
    print!("{yaml}");
    Ok(())
}
