//! Pipeline configuration
//!
//! Loaded from environment variables (with `.env` support via dotenvy)
//! and validated before a pool is opened.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::error::{EtlError, EtlResult};

pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/customer_warehouse";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    pub database: DatabaseConfig,
}

/// Warehouse connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
        }
    }
}

impl EtlConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_CONNECT_TIMEOUT_SECS`. A `.env` file in the working
    /// directory is honored when present.
    pub fn load() -> EtlResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(raw) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = raw.parse().map_err(|_| {
                EtlError::Config(format!("invalid DATABASE_MAX_CONNECTIONS: {}", raw))
            })?;
        }
        if let Ok(raw) = std::env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            config.database.connect_timeout_secs = raw.parse().map_err(|_| {
                EtlError::Config(format!("invalid DATABASE_CONNECT_TIMEOUT_SECS: {}", raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EtlResult<()> {
        if self.database.url.is_empty() {
            return Err(EtlError::Config("database URL must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(EtlError::Config(
                "database max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Open the warehouse connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> EtlResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(EtlError::ConnectionUnavailable)?;

    info!(
        max_connections = config.max_connections,
        "Warehouse connection pool created"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EtlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let mut config = EtlConfig::default();
        config.database.url = String::new();
        assert!(matches!(config.validate(), Err(EtlError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_connections() {
        let mut config = EtlConfig::default();
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(EtlError::Config(_))));
    }
}
