//! In-memory datasets laid out like the on-disk climate file.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

const CREATE_STATION: &str = "CREATE TABLE station (
    id INTEGER PRIMARY KEY,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
)";

const CREATE_MEASUREMENT: &str = "CREATE TABLE measurement (
    id INTEGER PRIMARY KEY,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
)";

/// Same layout with NUMERIC columns, which store whole numbers as INTEGER
const CREATE_STATION_NUMERIC: &str = "CREATE TABLE station (
    station TEXT,
    name TEXT,
    latitude NUMERIC,
    longitude NUMERIC,
    elevation NUMERIC
)";

const CREATE_MEASUREMENT_NUMERIC: &str = "CREATE TABLE measurement (
    station TEXT,
    date TEXT,
    prcp NUMERIC,
    tobs NUMERIC
)";

/// Single connection pool so every query sees the same in-memory database
pub async fn empty_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

pub async fn pool_with_tables(ddl: &[&str]) -> SqlitePool {
    let pool = empty_pool().await;
    for statement in ddl {
        sqlx::query(*statement)
            .execute(&pool)
            .await
            .expect("create table");
    }
    pool
}

pub async fn memory_pool() -> SqlitePool {
    pool_with_tables(&[CREATE_STATION, CREATE_MEASUREMENT]).await
}

pub async fn numeric_pool() -> SqlitePool {
    pool_with_tables(&[CREATE_STATION_NUMERIC, CREATE_MEASUREMENT_NUMERIC]).await
}

pub async fn insert_station(pool: &SqlitePool, station: &str, name: &str) {
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation)
         VALUES (?, ?, 21.2716, -157.8168, 3.0)",
    )
    .bind(station)
    .bind(name)
    .execute(pool)
    .await
    .expect("insert station");
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("insert measurement");
}
