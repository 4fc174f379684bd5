//! Warehouse sink primitives
//!
//! Existence check, full-column insert, and full-column update for one
//! customer record. All functions run on `&mut PgConnection` so they
//! participate in whatever transaction (or savepoint) the pipeline holds;
//! an existence check therefore observes writes applied earlier in the
//! same batch.

use sqlx::PgConnection;
use tracing::debug;

use crate::models::CustomerRecord;

/// Identity resolver: does a row with this identifier exist right now?
pub async fn customer_exists(
    conn: &mut PgConnection,
    customer_id: i64,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM customer_enriched WHERE customer_id = $1)",
    )
    .bind(customer_id)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// Insert a record that does not yet exist in the warehouse.
pub async fn insert_customer(
    conn: &mut PgConnection,
    record: &CustomerRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO customer_enriched (
            customer_id, first_name, last_name, email, phone, postcode,
            region, country, district, longitude, latitude, geo_enriched,
            company, company_size, industry, annual_revenue, is_business,
            calculated_risk, risk_score_numeric, risk_factors,
            status, processed_date, data_source, enrichment_status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
        "#,
    )
    .bind(record.customer_id)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.postcode)
    .bind(&record.region)
    .bind(&record.country)
    .bind(&record.district)
    .bind(record.longitude)
    .bind(record.latitude)
    .bind(record.geo_enriched)
    .bind(&record.company)
    .bind(&record.company_size)
    .bind(&record.industry)
    .bind(&record.annual_revenue)
    .bind(record.is_business)
    .bind(record.calculated_risk.map(|r| r.as_str()))
    .bind(record.risk_score_numeric)
    .bind(&record.risk_factors)
    .bind(record.status.map(|s| s.as_str()))
    .bind(record.processed_date)
    .bind(&record.data_source)
    .bind(&record.enrichment_status)
    .execute(conn)
    .await?;

    debug!(customer_id = ?record.customer_id, "Inserted customer");
    Ok(())
}

/// Update an existing record by identifier, replacing every ingested
/// column and stamping `modified_date` warehouse-side.
pub async fn update_customer(
    conn: &mut PgConnection,
    record: &CustomerRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE customer_enriched SET
            first_name = $1, last_name = $2, email = $3, phone = $4, postcode = $5,
            region = $6, country = $7, district = $8,
            longitude = $9, latitude = $10, geo_enriched = $11,
            company = $12, company_size = $13, industry = $14,
            annual_revenue = $15, is_business = $16,
            calculated_risk = $17, risk_score_numeric = $18, risk_factors = $19,
            status = $20, processed_date = $21, data_source = $22,
            enrichment_status = $23,
            modified_date = now()
        WHERE customer_id = $24
        "#,
    )
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.postcode)
    .bind(&record.region)
    .bind(&record.country)
    .bind(&record.district)
    .bind(record.longitude)
    .bind(record.latitude)
    .bind(record.geo_enriched)
    .bind(&record.company)
    .bind(&record.company_size)
    .bind(&record.industry)
    .bind(&record.annual_revenue)
    .bind(record.is_business)
    .bind(record.calculated_risk.map(|r| r.as_str()))
    .bind(record.risk_score_numeric)
    .bind(&record.risk_factors)
    .bind(record.status.map(|s| s.as_str()))
    .bind(record.processed_date)
    .bind(&record.data_source)
    .bind(&record.enrichment_status)
    .bind(record.customer_id)
    .execute(conn)
    .await?;

    debug!(customer_id = ?record.customer_id, "Updated customer");
    Ok(())
}
