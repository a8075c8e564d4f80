use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn index_lists_every_route() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    for route in [
        "/api/v1.0/rainfall",
        "/api/v1.0/weather_stations",
        "/api/v1.0/temperature_observations",
        "/api/v1.0/&lt;start&gt;",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
        "/docs",
    ] {
        assert!(text.contains(route), "missing {route}");
    }
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, _) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
}
