//! Schema command

use anyhow::{Context, Result};
use connection_details::crd::{PublishConnectionDetailsTo, SecretStoreConfig};
use schemars::schema_for;

pub fn schema_command() -> Result<()> {
    let schemas = serde_json::json!({
        "SecretStoreConfig": schema_for!(SecretStoreConfig),
        "PublishConnectionDetailsTo": schema_for!(PublishConnectionDetailsTo),
    });
    let output = serde_json::to_string_pretty(&schemas).context("Failed to serialize schemas")?;
    println!("{output}");
    Ok(())
}
