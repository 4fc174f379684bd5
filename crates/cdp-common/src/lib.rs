//! CDP Common Library
//!
//! Shared types, utilities, and error handling for the CDP project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all CDP workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Tracing-based logging bootstrap with file rotation
//! - **Checksums**: Source-file integrity and lineage utilities
//! - **Types**: Shared customer domain enums
//!
//! # Example
//!
//! ```no_run
//! use cdp_common::{Result, CdpError};
//! use cdp_common::checksum::Checksum;
//!
//! fn fingerprint(path: &str) -> Result<()> {
//!     let checksum = Checksum::from_file(path)?;
//!     tracing::info!(%checksum, "source file fingerprinted");
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CdpError, Result};
