use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use time::Date;

use super::{
    format_date, one_year_before, parse_stored_date, ClimateDatabase, ColumnKind, DateRange,
    Rainfall, StationRecord, TemperatureObservation, TemperatureStats,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query climate database: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Invalid date '{value}', expected YYYY-MM-DD: {source}")]
    DateParse {
        value: String,
        source: time::error::Parse,
    },
    #[error("Stored date '{value}' is not a valid YYYY-MM-DD date: {source}")]
    StoredDate {
        value: String,
        source: time::error::Parse,
    },
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Table '{table}' is missing columns: {missing:?}")]
    Schema { table: String, missing: Vec<String> },
    #[error("Column '{table}.{column}' is declared as '{declared}', expected {expected}")]
    ColumnType {
        table: String,
        column: String,
        declared: String,
        expected: ColumnKind,
    },
    #[error("Database integrity check failed: {0}")]
    Integrity(String),
}

impl Error {
    /// True when the request itself was malformed rather than the store failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::DateParse { .. })
    }
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Precipitation for the year leading up to the latest stored date
    async fn recent_rainfall(&self) -> Result<Rainfall, Error>;
    /// Every station identifier in row order, duplicates included
    async fn list_stations(&self) -> Result<Vec<String>, Error>;
    /// Station with the most measurement rows, first encountered on ties
    async fn most_active_station(&self) -> Result<Option<String>, Error>;
    /// Temperatures of the most active station for the year leading up to its latest date
    async fn top_station_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error>;
    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
}

pub struct ClimateAccess {
    db: Arc<ClimateDatabase>,
}

impl ClimateAccess {
    pub fn new(db: Arc<ClimateDatabase>) -> Self {
        Self { db }
    }

    async fn latest_date(&self, station: Option<&str>) -> Result<Option<Date>, Error> {
        let latest: Option<String> = match station {
            Some(station) => {
                sqlx::query_scalar("SELECT MAX(date) FROM measurement WHERE station = ?")
                    .bind(station)
                    .fetch_one(self.db.pool())
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT MAX(date) FROM measurement")
                    .fetch_one(self.db.pool())
                    .await?
            }
        };

        latest.as_deref().map(parse_stored_date).transpose()
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn recent_rainfall(&self) -> Result<Rainfall, Error> {
        let Some(latest) = self.latest_date(None).await? else {
            debug!("no measurements stored, rainfall is empty");
            return Ok(Rainfall::new());
        };
        let cutoff = format_date(one_year_before(latest))?;

        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT date, CAST(prcp AS REAL) FROM measurement
             WHERE date >= ?
             ORDER BY rowid",
        )
        .bind(&cutoff)
        .fetch_all(self.db.pool())
        .await?;
        debug!("rainfall since {}: {} rows", cutoff, rows.len());

        // Later rows replace earlier ones sharing a date
        let mut rainfall = Rainfall::new();
        for (date, prcp) in rows {
            rainfall.insert(date, prcp);
        }
        Ok(rainfall)
    }

    async fn list_stations(&self) -> Result<Vec<String>, Error> {
        let stations: Vec<StationRecord> = sqlx::query_as(
            "SELECT station, name,
                    CAST(latitude AS REAL) AS latitude,
                    CAST(longitude AS REAL) AS longitude,
                    CAST(elevation AS REAL) AS elevation
             FROM station ORDER BY rowid",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(stations.into_iter().map(|s| s.station).collect())
    }

    async fn most_active_station(&self) -> Result<Option<String>, Error> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, MIN(rowid) ASC
             LIMIT 1",
        )
        .fetch_optional(self.db.pool())
        .await?;

        Ok(station)
    }

    async fn top_station_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error> {
        let Some(station) = self.most_active_station().await? else {
            debug!("no measurements stored, no active station");
            return Ok(vec![]);
        };
        let Some(latest) = self.latest_date(Some(&station)).await? else {
            return Ok(vec![]);
        };
        let cutoff = format_date(one_year_before(latest))?;

        let observations: Vec<TemperatureObservation> = sqlx::query_as(
            "SELECT date, CAST(tobs AS REAL) AS temperature FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY rowid",
        )
        .bind(&station)
        .bind(&cutoff)
        .fetch_all(self.db.pool())
        .await?;
        debug!(
            "temperatures for {} since {}: {} rows",
            station,
            cutoff,
            observations.len()
        );

        Ok(observations)
    }

    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error> {
        let start = format_date(range.start)?;
        let end = range.end.map(format_date).transpose()?;

        let stats: (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
             FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(self.db.pool())
        .await?;

        Ok(stats.into())
    }
}
