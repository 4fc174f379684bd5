//! Database queries for the batch audit trail

use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::models::{AuditEntry, NewAuditEntry};

/// Persist one audit row for a batch.
///
/// Runs on the batch's own connection so the row only becomes visible
/// when the batch transaction commits. Returns the complete entry with
/// the generated id.
pub async fn insert_audit_entry(
    conn: &mut PgConnection,
    entry: &NewAuditEntry,
) -> Result<AuditEntry, sqlx::Error> {
    let record = sqlx::query_as::<_, AuditEntry>(
        r#"
        INSERT INTO enrichment_audit (
            batch_id, operation_type, records_processed, records_successful,
            records_failed, processing_start, processing_end, error_message,
            source_file, source_checksum, pipeline_version
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, batch_id, operation_type, records_processed,
                  records_successful, records_failed, processing_start,
                  processing_end, error_message, source_file,
                  source_checksum, pipeline_version
        "#,
    )
    .bind(entry.batch_id)
    .bind(entry.operation_type.as_str())
    .bind(entry.records_processed)
    .bind(entry.records_successful)
    .bind(entry.records_failed)
    .bind(entry.processing_start)
    .bind(entry.processing_end)
    .bind(&entry.error_message)
    .bind(&entry.source_file)
    .bind(&entry.source_checksum)
    .bind(&entry.pipeline_version)
    .fetch_one(conn)
    .await?;

    debug!(
        audit_id = %record.id,
        batch_id = %entry.batch_id,
        operation_type = %entry.operation_type,
        "Created audit entry"
    );

    Ok(record)
}

/// Fetch the audit row for a batch, if one was committed.
pub async fn get_batch_audit(
    pool: &PgPool,
    batch_id: Uuid,
) -> Result<Option<AuditEntry>, sqlx::Error> {
    let record = sqlx::query_as::<_, AuditEntry>(
        r#"
        SELECT id, batch_id, operation_type, records_processed,
               records_successful, records_failed, processing_start,
               processing_end, error_message, source_file,
               source_checksum, pipeline_version
        FROM enrichment_audit
        WHERE batch_id = $1
        "#,
    )
    .bind(batch_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audit::models::OperationType;
    use crate::models::PIPELINE_VERSION;
    use chrono::Utc;

    fn sample_entry(batch_id: Uuid) -> NewAuditEntry {
        let now = Utc::now();
        NewAuditEntry {
            batch_id,
            operation_type: OperationType::Upsert,
            records_processed: 6,
            records_successful: 5,
            records_failed: 1,
            processing_start: now,
            processing_end: now,
            error_message: Some("customer 1004: write failed".to_string()),
            source_file: Some("new_user.csv".to_string()),
            source_checksum: None,
            pipeline_version: PIPELINE_VERSION.to_string(),
        }
    }

    #[sqlx::test]
    async fn test_insert_and_read_back(pool: sqlx::PgPool) -> sqlx::Result<()> {
        let batch_id = Uuid::new_v4();
        let mut conn = pool.acquire().await?;

        let created = insert_audit_entry(&mut conn, &sample_entry(batch_id)).await?;
        assert_eq!(created.batch_id, batch_id);
        assert_eq!(created.operation_type, "upsert");
        assert_eq!(created.records_processed, 6);
        drop(conn);

        let fetched = get_batch_audit(&pool, batch_id).await?.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.records_successful, 5);
        assert_eq!(fetched.records_failed, 1);
        assert_eq!(fetched.pipeline_version, PIPELINE_VERSION);
        assert_eq!(fetched.source_file.as_deref(), Some("new_user.csv"));

        Ok(())
    }

    #[sqlx::test]
    async fn test_get_batch_audit_missing(pool: sqlx::PgPool) -> sqlx::Result<()> {
        let fetched = get_batch_audit(&pool, Uuid::new_v4()).await?;
        assert!(fetched.is_none());
        Ok(())
    }
}
