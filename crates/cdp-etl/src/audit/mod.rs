//! Batch audit trail
//!
//! One `enrichment_audit` row is written per batch, inside the batch's own
//! transaction, so audit visibility and data visibility are atomic for
//! external readers.

pub mod models;
pub mod queries;

pub use models::{error_summary, AuditEntry, NewAuditEntry, OperationType};
pub use queries::{get_batch_audit, insert_audit_entry};
