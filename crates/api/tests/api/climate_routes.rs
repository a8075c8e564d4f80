use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{Error, Rainfall, TemperatureObservation, TemperatureStats};
use serde_json::{from_slice, json, Value};
use std::sync::Arc;
use time::macros::date;

#[tokio::test]
async fn rainfall_returns_date_keyed_precipitation() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_recent_rainfall().times(1).returning(|| {
        let mut rainfall = Rainfall::new();
        rainfall.insert("2017-08-23".to_string(), Some(0.45));
        rainfall.insert("2016-08-23".to_string(), Some(0.0));
        rainfall.insert("2017-01-01".to_string(), None);
        Ok(rainfall)
    });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/rainfall").await;

    assert_eq!(status, StatusCode::OK);
    // keys come back sorted by date
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"2016-08-23":0.0,"2017-01-01":null,"2017-08-23":0.45}"#
    );
}

#[tokio::test]
async fn rainfall_store_failure_is_server_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_recent_rainfall()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::PoolTimedOut)));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app.get("/api/v1.0/rainfall").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn weather_stations_returns_identifiers() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_list_stations()
        .times(1)
        .returning(|| Ok(vec!["USC00519397".to_string(), "USC00513117".to_string()]));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/weather_stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations: Vec<String> = from_slice(&body).unwrap();
    assert_eq!(stations, vec!["USC00519397", "USC00513117"]);
}

#[tokio::test]
async fn temperature_observations_returns_records() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_top_station_temperatures()
        .times(1)
        .returning(|| {
            Ok(vec![
                TemperatureObservation {
                    date: "2016-08-18".to_string(),
                    temperature: Some(80.0),
                },
                TemperatureObservation {
                    date: "2016-08-19".to_string(),
                    temperature: None,
                },
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/temperature_observations").await;

    assert_eq!(status, StatusCode::OK);
    let observations: Value = from_slice(&body).unwrap();
    assert_eq!(
        observations,
        json!([
            {"date": "2016-08-18", "temperature": 80.0},
            {"date": "2016-08-19", "temperature": null},
        ])
    );
}

#[tokio::test]
async fn temperature_stats_from_start_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .withf(|range| range.start == date!(2017 - 01 - 01) && range.end.is_none())
        .times(1)
        .returning(|_| {
            Ok(TemperatureStats {
                min: Some(60.0),
                avg: Some(70.0),
                max: Some(80.0),
            })
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    let stats: Value = from_slice(&body).unwrap();
    assert_eq!(stats, json!([60.0, 70.0, 80.0]));
}

#[tokio::test]
async fn temperature_stats_between_dates() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .withf(|range| {
            range.start == date!(2017 - 01 - 01) && range.end == Some(date!(2016 - 01 - 01))
        })
        .times(1)
        .returning(|_| Ok(TemperatureStats::default()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/2017-01-01/2016-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "[null,null,null]");
}

#[tokio::test]
async fn malformed_start_date_is_bad_request() {
    // no expectations: the store must not be queried
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = test_app.get("/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("not-a-date"));
}

#[tokio::test]
async fn malformed_end_date_is_bad_request() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, _) = test_app.get("/api/v1.0/2017-01-01/2017-02-30").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn named_routes_are_not_treated_as_dates() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_list_stations()
        .times(1)
        .returning(|| Ok(vec![]));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/weather_stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "[]");
}

#[tokio::test]
async fn temperature_stats_accepts_unpadded_dates() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .withf(|range| {
            range.start == date!(2017 - 01 - 05) && range.end == Some(date!(2017 - 02 - 01))
        })
        .times(1)
        .returning(|_| Ok(TemperatureStats::default()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app.get("/api/v1.0/2017-1-5/2017-2-1").await;

    assert_eq!(status, StatusCode::OK);
}
