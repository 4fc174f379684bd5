//! Record source: CSV parsing and field normalization
//!
//! Reads a whole batch into memory (batches are finite), then stamps
//! provenance fields before the records are handed to the pipeline. Any
//! structural problem with the file is fatal for the batch; nothing is
//! partially loaded.

use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EtlError, EtlResult};
use crate::models::{CustomerRecord, DATA_SOURCE_TAG, FULLY_ENRICHED};

/// Column that must be present in the header row.
const IDENTIFIER_COLUMN: &str = "customer_id";

/// Parse a customer CSV into records, in file order.
///
/// Fails with [`EtlError::SourceUnreadable`] when the file is missing,
/// malformed, or its header lacks the `customer_id` column. An empty
/// identifier *cell* is tolerated here; the pipeline records it as a
/// per-record failure.
pub fn read_records(path: &Path) -> EtlResult<Vec<CustomerRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| source_unreadable(path, e))?;

    let headers = reader.headers().map_err(|e| source_unreadable(path, e))?;
    if !headers.iter().any(|h| h == IDENTIFIER_COLUMN) {
        return Err(EtlError::SourceUnreadable {
            path: path.display().to_string(),
            reason: format!("missing required column: {}", IDENTIFIER_COLUMN),
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CustomerRecord = row.map_err(|e| source_unreadable(path, e))?;
        records.push(record);
    }

    info!(count = records.len(), path = %path.display(), "Loaded records from source file");
    Ok(records)
}

/// Stamp provenance fields on a freshly parsed batch:
/// the processing timestamp, the fixed pipeline tag, and a default
/// enrichment status where the file supplied none.
pub fn normalize(records: &mut [CustomerRecord], processed_at: DateTime<Utc>) {
    for record in records.iter_mut() {
        record.processed_date = Some(processed_at);
        record.data_source = DATA_SOURCE_TAG.to_string();
        if record.enrichment_status.is_none() {
            record.enrichment_status = Some(FULLY_ENRICHED.to_string());
        }
    }
    debug!(count = records.len(), "Normalized batch");
}

/// Read and normalize in one step.
pub fn load_records(path: &Path) -> EtlResult<Vec<CustomerRecord>> {
    let mut records = read_records(path)?;
    normalize(&mut records, Utc::now());
    Ok(records)
}

fn source_unreadable(path: &Path, error: impl std::fmt::Display) -> EtlError {
    EtlError::SourceUnreadable {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_records_in_order() {
        let file = write_csv(
            "customer_id,first_name,calculated_risk,status\n\
             1001,John,Low,active\n\
             1002,Jane,High,suspended\n",
        );

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].customer_id, Some(1001));
        assert_eq!(records[0].first_name.as_deref(), Some("John"));
        assert_eq!(
            records[1].calculated_risk,
            Some(cdp_common::types::RiskLevel::High)
        );
        assert_eq!(
            records[1].status,
            Some(cdp_common::types::CustomerStatus::Suspended)
        );
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = read_records(Path::new("/nonexistent/batch.csv"));
        assert!(matches!(result, Err(EtlError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_missing_identifier_column_is_fatal() {
        let file = write_csv("first_name,last_name\nJohn,Smith\n");
        let result = read_records(file.path());
        assert!(matches!(result, Err(EtlError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_empty_identifier_cell_is_tolerated() {
        let file = write_csv("customer_id,first_name\n,John\n1002,Jane\n");
        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].customer_id, None);
        assert_eq!(records[1].customer_id, Some(1002));
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let file = write_csv("customer_id,longitude\n1001,not-a-number\n");
        let result = read_records(file.path());
        assert!(matches!(result, Err(EtlError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_normalize_stamps_provenance() {
        let file = write_csv(
            "customer_id,enrichment_status\n\
             1001,\n\
             1002,Partially Enriched\n",
        );
        let now = Utc::now();

        let mut records = read_records(file.path()).unwrap();
        normalize(&mut records, now);

        for record in &records {
            assert_eq!(record.processed_date, Some(now));
            assert_eq!(record.data_source, DATA_SOURCE_TAG);
        }
        assert_eq!(records[0].enrichment_status.as_deref(), Some(FULLY_ENRICHED));
        assert_eq!(
            records[1].enrichment_status.as_deref(),
            Some("Partially Enriched")
        );
    }
}
