use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

use super::{Error, SCHEMA};

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: climate_api_core::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Read-only handle on the climate dataset.
///
/// Connections are checked out of the pool per query and returned when the
/// query future completes or is dropped.
pub struct ClimateDatabase {
    pool: SqlitePool,
}

impl ClimateDatabase {
    pub async fn open(path: &str, settings: &PoolSettings) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await?;

        let db = Self::from_pool(pool).await?;
        info!("Climate dataset opened read-only at: {}", path);

        Ok(db)
    }

    /// Wrap an existing pool, checking connectivity and the expected schema
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, Error> {
        let db = Self { pool };
        db.health_check().await?;
        db.validate_schema().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await?;
        if result != "ok" {
            return Err(Error::Integrity(result));
        }

        Ok(())
    }

    /// Confirm every table and column the queries read is present with a usable type
    pub async fn validate_schema(&self) -> Result<(), Error> {
        for table in SCHEMA {
            let present: Vec<(String, String)> =
                sqlx::query_as("SELECT name, type FROM pragma_table_info(?)")
                    .bind(table.name)
                    .fetch_all(&self.pool)
                    .await?;

            let missing: Vec<String> = table
                .columns
                .iter()
                .filter(|column| {
                    !present
                        .iter()
                        .any(|(name, _)| name.eq_ignore_ascii_case(column.name))
                })
                .map(|column| column.name.to_string())
                .collect();

            if !missing.is_empty() {
                warn!("table {} is missing columns {:?}", table.name, missing);
                return Err(Error::Schema {
                    table: table.name.to_string(),
                    missing,
                });
            }

            for column in table.columns {
                let declared = present
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(column.name))
                    .map(|(_, declared)| declared.as_str())
                    .unwrap_or_default();

                if !column.kind.accepts(declared) {
                    warn!(
                        "column {}.{} is declared '{}', expected {}",
                        table.name, column.name, declared, column.kind
                    );
                    return Err(Error::ColumnType {
                        table: table.name.to_string(),
                        column: column.name.to_string(),
                        declared: declared.to_string(),
                        expected: column.kind,
                    });
                }
            }
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Climate dataset connections closed");
    }
}
