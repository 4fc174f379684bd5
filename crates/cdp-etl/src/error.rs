//! Pipeline error taxonomy
//!
//! Two layers: fatal conditions that abort a batch (`EtlError`), and
//! per-record failures (`RecordFailure`) that are captured in the
//! `BatchResult` while processing continues.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type EtlResult<T> = std::result::Result<T, EtlError>;

/// Fatal pipeline errors. Everything else is recorded per record.
#[derive(Error, Debug)]
pub enum EtlError {
    /// The input file is missing, unreadable, or structurally incompatible.
    /// Nothing is written when this occurs.
    #[error("source unreadable: {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// The warehouse connection could not be opened. Nothing is written.
    #[error("warehouse connection unavailable: {0}")]
    ConnectionUnavailable(#[source] sqlx::Error),

    /// The batch transaction failed to commit. All writes of the batch,
    /// including the audit row, are rolled back.
    #[error("batch commit failed: {0}")]
    CommitFailed(#[source] sqlx::Error),

    /// Infrastructure failure inside the batch loop (e.g. a savepoint
    /// could not be released). The connection is considered broken.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Classification of a single record's failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFailureKind {
    /// The record has no customer identifier, so it cannot be matched.
    MissingIdentifier,
    /// The warehouse rejected the write with a constraint violation.
    ConstraintViolation,
    /// Any other write error (type mismatch, connectivity loss, ...).
    WriteFailed,
}

impl RecordFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingIdentifier => "missing_identifier",
            Self::ConstraintViolation => "constraint_violation",
            Self::WriteFailed => "write_failed",
        }
    }
}

/// One failed record inside a batch. Recorded in source order in
/// `BatchResult::errors`; never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub customer_id: Option<i64>,
    pub kind: RecordFailureKind,
    pub message: String,
}

impl RecordFailure {
    pub fn missing_identifier() -> Self {
        Self {
            customer_id: None,
            kind: RecordFailureKind::MissingIdentifier,
            message: "record has no customer_id".to_string(),
        }
    }

    /// Classify a write error from the warehouse for one record.
    pub fn from_write_error(customer_id: i64, error: &sqlx::Error) -> Self {
        let kind = match error {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.is_check_violation()
                    || db_err.is_foreign_key_violation() =>
            {
                RecordFailureKind::ConstraintViolation
            },
            _ => RecordFailureKind::WriteFailed,
        };

        Self {
            customer_id: Some(customer_id),
            kind,
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.customer_id {
            Some(id) => write!(f, "customer {}: {}", id, self.message),
            None => write!(f, "customer <missing>: {}", self.message),
        }
    }
}
