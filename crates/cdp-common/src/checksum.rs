//! Checksum utilities for source-file lineage
//!
//! Every batch records the sha256 of the file it was loaded from, so an
//! audit row can always be traced back to the exact input that produced it.

use crate::error::{CdpError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// A hex-encoded sha256 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum(String);

impl Checksum {
    /// Compute the checksum of a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = std::fs::File::open(path)?;
        Self::from_reader(&mut file)
    }

    /// Compute the checksum of any readable source.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// Verify this checksum against an expected value.
    pub fn verify(&self, expected: &str) -> Result<()> {
        if self.0 == expected {
            Ok(())
        } else {
            Err(CdpError::ChecksumMismatch {
                expected: expected.to_string(),
                actual: self.0.clone(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
