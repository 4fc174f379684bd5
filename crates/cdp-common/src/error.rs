//! Error types for CDP

use thiserror::Error;

/// Result type alias for CDP operations
pub type Result<T> = std::result::Result<T, CdpError>;

/// Main error type for CDP
#[derive(Error, Debug)]
pub enum CdpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
