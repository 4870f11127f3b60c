//! # Credential Values
//!
//! In-memory wrapper for resolved credential bytes.

use std::fmt;
use zeroize::Zeroizing;

/// A resolved credential. Memory is zeroed on drop.
///
/// Deliberately not `Serialize`, `Display` or `Clone`, and `Debug` prints
/// only the length.
pub struct CredentialValue {
    inner: Zeroizing<Vec<u8>>,
}

impl CredentialValue {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Zeroizing::new(bytes),
        }
    }

    /// The value produced by the `None` source
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// The value as UTF-8, e.g. for tokens
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for CredentialValue {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl fmt::Debug for CredentialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialValue([REDACTED; {} bytes])", self.inner.len())
    }
}
