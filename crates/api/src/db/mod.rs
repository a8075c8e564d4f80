pub mod climate_data;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod fixtures;

pub use climate_data::*;
pub use schema::*;
pub use sqlite::*;

use serde::{ser::SerializeTuple, Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use time::{macros::format_description, Date, Duration};
use utoipa::ToSchema;

/// Precipitation keyed by `YYYY-MM-DD` date, serialized with sorted keys
pub type Rainfall = BTreeMap<String, Option<f64>>;

/// Length of the "last year" window used by the rainfall and observation routes
pub const YEAR_WINDOW_DAYS: i64 = 365;

/// A weather station as stored in the `station` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StationRecord {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: Option<f64>,
}

/// Temperature aggregate over a date range.
///
/// Serializes as the three element array `[min, avg, max]`; every entry is
/// `null` when no rows matched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.avg)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}

impl From<(Option<f64>, Option<f64>, Option<f64>)> for TemperatureStats {
    fn from((min, avg, max): (Option<f64>, Option<f64>, Option<f64>)) -> Self {
        Self { min, avg, max }
    }
}

/// Inclusive date bounds for temperature statistics, `end` open when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            start: parse_date(start)?,
            end: end.map(parse_date).transpose()?,
        })
    }
}

/// Parse a client supplied `YYYY-MM-DD` date, month and day may be unpadded
pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(
        value,
        format_description!("[year]-[month padding:none]-[day padding:none]"),
    ).map_err(|source| {
        Error::DateParse {
            value: value.to_owned(),
            source,
        }
    })
}

/// Parse a `YYYY-MM-DD` date read back from the dataset
pub fn parse_stored_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|source| {
        Error::StoredDate {
            value: value.to_owned(),
            source,
        }
    })
}

pub fn format_date(date: Date) -> Result<String, Error> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

/// First day of the year-long window ending on `latest`
pub fn one_year_before(latest: Date) -> Date {
    latest.saturating_sub(Duration::days(YEAR_WINDOW_DAYS))
}
