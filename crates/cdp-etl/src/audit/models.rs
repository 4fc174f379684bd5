//! Audit data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordFailure;

/// How many failure messages are kept in the audit row's error summary.
pub const MAX_SUMMARY_ERRORS: usize = 5;

/// Delimiter between failure messages in the error summary.
pub const SUMMARY_DELIMITER: &str = "; ";

/// Operation type recorded for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Upsert,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upsert => "upsert",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit row as persisted in `enrichment_audit`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub operation_type: String,
    pub records_processed: i64,
    pub records_successful: i64,
    pub records_failed: i64,
    pub processing_start: DateTime<Utc>,
    pub processing_end: DateTime<Utc>,
    /// First [`MAX_SUMMARY_ERRORS`] failure messages, joined; absent when
    /// the batch had no failures.
    pub error_message: Option<String>,
    pub source_file: Option<String>,
    pub source_checksum: Option<String>,
    pub pipeline_version: String,
}

/// Input for creating an audit row
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub batch_id: Uuid,
    pub operation_type: OperationType,
    pub records_processed: i64,
    pub records_successful: i64,
    pub records_failed: i64,
    pub processing_start: DateTime<Utc>,
    pub processing_end: DateTime<Utc>,
    pub error_message: Option<String>,
    pub source_file: Option<String>,
    pub source_checksum: Option<String>,
    pub pipeline_version: String,
}

/// Truncated error summary for the audit row: the first
/// [`MAX_SUMMARY_ERRORS`] failures joined by [`SUMMARY_DELIMITER`], or
/// `None` when the batch had no failures.
pub fn error_summary(errors: &[RecordFailure]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }

    let summary = errors
        .iter()
        .take(MAX_SUMMARY_ERRORS)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(SUMMARY_DELIMITER);

    Some(summary)
}
