//! # Table Digest
//!
//! A SHA-256 digest over the exact table bytes. Two generation runs over the
//! same inputs must produce the same digest; `tzp generate` logs it so build
//! pipelines can compare runs without keeping both tables around.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// SHA-256 of a serialized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableDigest([u8; 32]);

impl TableDigest {
    /// Digest `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hasher.finalize().into())
    }

    /// The raw 32 digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for TableDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl Serialize for TableDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_digest() {
        assert_eq!(
            TableDigest::of(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_display_is_tagged() {
        let d = TableDigest::of(&[0, 0, 0, 0]);
        let s = d.to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_digest_distinguishes_inputs() {
        assert_ne!(TableDigest::of(&[0, 0, 0, 0]), TableDigest::of(&[0, 0, 0, 1]));
    }
}
