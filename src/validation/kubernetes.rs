//! # Kubernetes Validation
//!
//! Validates Kubernetes resource names and namespaces per RFC 1123.

use anyhow::Result;
use regex::Regex;

/// Validate Kubernetes resource name (RFC 1123 subdomain)
/// Format: lowercase alphanumeric, hyphens, dots
/// Length: 1-253 characters
/// Cannot start or end with hyphen or dot
pub fn validate_kubernetes_name(name: &str, field_name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow::anyhow!("{field_name} cannot be empty"));
    }

    if name.len() > 253 {
        return Err(anyhow::anyhow!(
            "{} '{}' exceeds maximum length of 253 characters (got {})",
            field_name,
            name,
            name.len()
        ));
    }

    let name_regex =
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .map_err(|e| anyhow::anyhow!("Failed to compile regex: {e}"))?;

    if !name_regex.is_match(name) {
        return Err(anyhow::anyhow!(
            "{field_name} '{name}' must be a valid Kubernetes name (lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot)"
        ));
    }

    Ok(())
}

/// Validate Kubernetes namespace (RFC 1123 label)
/// Format: lowercase alphanumeric, hyphens
/// Length: 1-63 characters
/// Cannot start or end with hyphen
pub fn validate_kubernetes_namespace(namespace: &str, field_name: &str) -> Result<()> {
    if namespace.is_empty() {
        return Err(anyhow::anyhow!("{field_name} cannot be empty"));
    }

    if namespace.len() > 63 {
        return Err(anyhow::anyhow!(
            "{} '{}' exceeds maximum length of 63 characters (got {})",
            field_name,
            namespace,
            namespace.len()
        ));
    }

    let namespace_regex = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$")
        .map_err(|e| anyhow::anyhow!("Failed to compile regex: {e}"))?;

    if !namespace_regex.is_match(namespace) {
        return Err(anyhow::anyhow!(
            "{field_name} '{namespace}' must be a valid Kubernetes namespace (lowercase alphanumeric, hyphens; cannot start/end with hyphen)"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dns_subdomain_names() {
        for name in ["default", "vault-config", "store.v1", "a"] {
            assert!(validate_kubernetes_name(name, "configRef.name").is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_invalid_names() {
        let too_long = "a".repeat(254);
        for name in ["", "Default", "-vault", "vault-", "vault_config", too_long.as_str()] {
            assert!(validate_kubernetes_name(name, "configRef.name").is_err(), "{name}");
        }
    }

    #[test]
    fn rejects_invalid_namespaces() {
        assert!(validate_kubernetes_namespace("crossplane-system", "defaultScope").is_ok());
        assert!(validate_kubernetes_namespace("crossplane.system", "defaultScope").is_err());
        assert!(validate_kubernetes_namespace(&"a".repeat(64), "defaultScope").is_err());
    }
}
