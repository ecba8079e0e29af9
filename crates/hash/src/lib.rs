#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content fingerprints for lcdb-test-data
//!
//! The conda environment built for a dataset is keyed by a digest of the
//! dependency manifest, so identical manifests always map to the same
//! environment directory and any change to the manifest maps to a new one.

use md5::{Digest, Md5};
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of hex characters used when a fingerprint names a directory
pub const SHORT_LEN: usize = 6;

/// A 128-bit MD5 digest of some content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: [u8; 16],
}

impl Fingerprint {
    /// Create a fingerprint from raw digest bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    /// Compute the fingerprint of a byte slice
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(data);

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hasher.finalize());
        Self::from_bytes(bytes)
    }

    /// Full lowercase hex rendering (32 characters)
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// First `len` hex characters, clamped to the full digest length
    #[must_use]
    pub fn prefix(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }

    /// The short form used for environment directory names
    #[must_use]
    pub fn short(&self) -> String {
        self.prefix(SHORT_LEN)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let fp = Fingerprint::from_data(b"hello world");
        assert_eq!(fp.to_hex(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_short_prefix() {
        let fp = Fingerprint::from_data(b"packageA\npackageB\n");
        assert_eq!(fp.to_hex(), "bdf917f01aa19868e20d77a60f6f4ec1");
        assert_eq!(fp.short(), "bdf917");
        assert_eq!(fp.short().len(), SHORT_LEN);
    }

    #[test]
    fn test_prefix_clamps() {
        let fp = Fingerprint::from_data(b"");
        assert_eq!(fp.prefix(100).len(), 32);
        assert_eq!(fp.prefix(0), "");
    }

    #[test]
    fn test_serialization() {
        let fp = Fingerprint::from_data(b"hello world");
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "\"5eb63bbbe01eeed093cb22bb8f5acdc3\"");
    }
}
