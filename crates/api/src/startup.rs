use crate::{
    db, index_handler, rainfall, routes, temperature_observations, temperature_stats_between,
    temperature_stats_from, weather_stations, ClimateAccess, ClimateData, ClimateDatabase,
    PoolSettings,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_api_core::is_readable_file;
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::rainfall,
        routes::climate::climate_routes::weather_stations,
        routes::climate::climate_routes::temperature_observations,
        routes::climate::climate_routes::temperature_stats_from,
        routes::climate::climate_routes::temperature_stats_between,
    ),
    components(
        schemas(db::TemperatureObservation)
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over daily precipitation and temperature observations")
    )
)]
struct ApiDoc;

/// Open the dataset read-only and validate its schema
pub async fn open_database(
    database_path: &str,
    settings: &PoolSettings,
) -> Result<Arc<ClimateDatabase>, anyhow::Error> {
    if !is_readable_file(database_path) {
        return Err(anyhow!(
            "climate dataset not found or unreadable: {}",
            database_path
        ));
    }

    let db = ClimateDatabase::open(database_path, settings)
        .await
        .map_err(|e| anyhow!("error opening climate dataset: {}", e))?;

    Ok(Arc::new(db))
}

pub fn build_app_state(db: Arc<ClimateDatabase>) -> AppState {
    AppState {
        climate_db: Arc::new(ClimateAccess::new(db)),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/rainfall", get(rainfall))
        .route("/api/v1.0/weather_stations", get(weather_stations))
        .route(
            "/api/v1.0/temperature_observations",
            get(temperature_observations),
        )
        .route("/api/v1.0/{start}", get(temperature_stats_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_stats_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
