use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::{error, warn};
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    db::{DateRange, Error, TemperatureObservation, TemperatureStats},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/rainfall",
    responses(
        (status = OK, description = "Precipitation keyed by date for the last 12 months of data", content_type = "application/json", body = BTreeMap<String, f64>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the climate dataset")
    ))]
pub async fn rainfall(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    state
        .climate_db
        .recent_rainfall()
        .await
        .map(Json)
        .map_err(|e| error_response("rainfall", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/weather_stations",
    responses(
        (status = OK, description = "Every weather station identifier", content_type = "application/json", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the climate dataset")
    ))]
pub async fn weather_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    state
        .climate_db
        .list_stations()
        .await
        .map(Json)
        .map_err(|e| error_response("weather stations", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temperature_observations",
    responses(
        (status = OK, description = "Last 12 months of temperatures for the station with the most observations", content_type = "application/json", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the climate dataset")
    ))]
pub async fn temperature_observations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, (StatusCode, String)> {
    state
        .climate_db
        .top_station_temperatures()
        .await
        .map(Json)
        .map_err(|e| error_response("temperature observations", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature from the start date onward", content_type = "application/json", body = Vec<f64>),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the climate dataset")
    ))]
pub async fn temperature_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    temperature_stats(&state, &start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature between the dates, all null when nothing matches", content_type = "application/json", body = Vec<f64>),
        (status = BAD_REQUEST, description = "Start or end is not a YYYY-MM-DD date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the climate dataset")
    ))]
pub async fn temperature_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    temperature_stats(&state, &start, Some(&end)).await
}

async fn temperature_stats(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    let range = DateRange::parse(start, end).map_err(|e| error_response("temperature stats", e))?;

    state
        .climate_db
        .temperature_stats(&range)
        .await
        .map(Json)
        .map_err(|e| error_response("temperature stats", e))
}

fn error_response(resource: &str, err: Error) -> (StatusCode, String) {
    if err.is_client_error() {
        warn!("rejected {} request: {}", resource, err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!("error loading {}: {}", resource, err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load {}: {}", resource, err),
        )
    }
}
