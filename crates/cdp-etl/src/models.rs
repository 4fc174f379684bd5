//! Pipeline data models

use cdp_common::types::{CustomerStatus, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::RecordFailure;

// ============================================================================
// Provenance Constants
// ============================================================================

/// Fixed provenance tag stamped on every record this pipeline produces.
pub const DATA_SOURCE_TAG: &str = "cdp_etl_v1";

/// Version tag written to every audit row.
pub const PIPELINE_VERSION: &str = "v1.0";

/// Default enrichment status for records that arrive without one.
pub const FULLY_ENRICHED: &str = "Fully Enriched";

/// One customer row to reconcile against the warehouse.
///
/// Parsed from a CSV row by the record source. Every field except the
/// identifier is optional; a missing identifier is handled as a per-record
/// failure downstream, not a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: Option<i64>,

    // Name, contact, and address
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub district: Option<String>,

    // Geolocation
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coerce_bool")]
    pub geo_enriched: bool,

    // Business classification
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub annual_revenue: Option<String>,
    #[serde(default, deserialize_with = "coerce_bool")]
    pub is_business: bool,

    // Risk
    #[serde(default)]
    pub calculated_risk: Option<RiskLevel>,
    #[serde(default)]
    pub risk_score_numeric: Option<f64>,
    #[serde(default)]
    pub risk_factors: Option<String>,

    // Lifecycle
    #[serde(default)]
    pub status: Option<CustomerStatus>,

    // Provenance: stamped by the record source, never read from the file
    #[serde(skip_deserializing)]
    pub processed_date: Option<DateTime<Utc>>,
    #[serde(skip_deserializing)]
    pub data_source: String,
    #[serde(default)]
    pub enrichment_status: Option<String>,
}

/// Accepts `0`/`1` as well as `true`/`false` (any case); an empty or absent
/// cell is `false`.
fn coerce_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("0") => Ok(false),
        Some("1") => Ok(true),
        Some(other) => match other.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("invalid boolean value: {}", other))),
        },
    }
}

/// Aggregate outcome of one batch.
///
/// Counters are tallied once per record, then `finalize` derives the
/// duration and success flag. Holds `total == inserts + updates + failed`
/// at all times.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub total_records: usize,
    pub successful_inserts: usize,
    pub successful_updates: usize,
    pub failed_records: usize,
    pub errors: Vec<RecordFailure>,
    pub duration_seconds: f64,
    pub success: bool,
}

impl BatchResult {
    pub fn new(batch_id: Uuid, total_records: usize) -> Self {
        Self {
            batch_id,
            total_records,
            successful_inserts: 0,
            successful_updates: 0,
            failed_records: 0,
            errors: Vec::new(),
            duration_seconds: 0.0,
            success: false,
        }
    }

    pub fn record_insert(&mut self) {
        self.successful_inserts += 1;
    }

    pub fn record_update(&mut self) {
        self.successful_updates += 1;
    }

    pub fn record_failure(&mut self, failure: RecordFailure) {
        self.failed_records += 1;
        self.errors.push(failure);
    }

    /// Records that were written, regardless of insert or update.
    pub fn successful(&self) -> usize {
        self.successful_inserts + self.successful_updates
    }

    pub fn finalize(&mut self, elapsed: std::time::Duration) {
        self.duration_seconds = elapsed.as_secs_f64();
        self.success = self.failed_records == 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_batch_result_tally() {
        let mut result = BatchResult::new(Uuid::new_v4(), 3);
        result.record_insert();
        result.record_update();
        result.record_failure(RecordFailure::missing_identifier());
        result.finalize(Duration::from_millis(1500));

        assert_eq!(
            result.total_records,
            result.successful_inserts + result.successful_updates + result.failed_records
        );
        assert_eq!(result.successful(), 2);
        assert_eq!(result.errors.len(), 1);
        assert!(!result.success);
        assert!(result.duration_seconds > 1.0);
    }

    #[test]
    fn test_success_iff_no_failures() {
        let mut result = BatchResult::new(Uuid::new_v4(), 2);
        result.record_insert();
        result.record_insert();
        result.finalize(Duration::ZERO);
        assert!(result.success);

        let mut result = BatchResult::new(Uuid::new_v4(), 1);
        result.record_failure(RecordFailure::missing_identifier());
        result.finalize(Duration::ZERO);
        assert!(!result.success);
    }

    #[test]
    fn test_coerce_bool_from_csv() {
        let data = "\
customer_id,geo_enriched,is_business
1001,1,0
1002,true,FALSE
1003,,
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let records: Vec<CustomerRecord> =
            reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert!(records[0].geo_enriched);
        assert!(!records[0].is_business);
        assert!(records[1].geo_enriched);
        assert!(!records[1].is_business);
        assert!(!records[2].geo_enriched);
        assert!(!records[2].is_business);
    }

    #[test]
    fn test_coerce_bool_rejects_garbage() {
        let data = "customer_id,geo_enriched\n1001,maybe\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let parsed: Result<Vec<CustomerRecord>, _> = reader.deserialize().collect();
        assert!(parsed.is_err());
    }
}
