//! Integration tests for dummy-data mode.
//!
//! Every route answers from canned payloads and the API key gate is
//! bypassed, so no database or secret is needed to demo the service.
//!
//! Run with: cargo test --test dummy_mode_test

use std::net::SocketAddr;

use serde_json::{json, Value};

use greenhouse_api::common::AppState;
use greenhouse_api::config::{Config, Environment};
use greenhouse_api::routes::build_router;

fn dummy_config() -> Config {
    Config {
        environment: Environment::Development,
        port: 0,
        database_url: None,
        db_pool_size: 5,
        db_max_overflow: 10,
        api_key: None,
        allow_query_key_fallback: false,
        external_db_api_url: None,
        use_dummy_data: true,
    }
}

async fn spawn_server() -> SocketAddr {
    let state = AppState::new(None, dummy_config());
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve test app");
    });
    addr
}

async fn get_json(addr: SocketAddr, route: &str) -> Value {
    let resp = reqwest::get(format!("http://{addr}{route}"))
        .await
        .expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK, "{route}");
    resp.json().await.expect("json body")
}

#[tokio::test]
async fn latest_readings_return_the_sample_fleet() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/latest-readings").await;

    assert_eq!(
        body,
        json!({
            "status": "success",
            "count": 1,
            "readings": [{
                "reading_id": 1,
                "zone_code": "HZ1",
                "encoded_data": "01F400C8012C",
                "timestamp": "2025-09-22T08:00:00Z"
            }]
        })
    );
}

#[tokio::test]
async fn device_latest_returns_the_sample_reading() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/latest-readings/HZ1").await;

    assert_eq!(
        body,
        json!({
            "status": "success",
            "device_code": "HZ1",
            "reading": {
                "encoded_data": "01F400C8012C",
                "timestamp": "2025-09-22T08:00:00Z"
            }
        })
    );
}

#[tokio::test]
async fn device_latest_echoes_the_requested_code() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/latest-readings/ZX9").await;

    assert_eq!(body["device_code"], "ZX9");
}

#[tokio::test]
async fn day_window_returns_two_bucketed_samples() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/HZ1/24").await;

    assert_eq!(
        body,
        json!({
            "status": "success",
            "device_code": "HZ1",
            "interval": "4h",
            "readings": [
                {"encoded_data": "01F400BE012C", "timestamp": "2025-09-22T08:00:00Z"},
                {"encoded_data": "01F400C00128", "timestamp": "2025-09-22T04:00:00Z"}
            ]
        })
    );
}

#[tokio::test]
async fn week_window_returns_daily_averages() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/HZ1/7").await;

    assert_eq!(
        body,
        json!({
            "status": "success",
            "device_code": "HZ1",
            "interval": "1d",
            "readings": [
                {"day": "2025-09-22", "avg_encoded": 500.5, "sample_time": "2025-09-22T08:00:00Z"},
                {"day": "2025-09-21", "avg_encoded": 485.2, "sample_time": "2025-09-21T08:00:00Z"}
            ]
        })
    );
}

#[tokio::test]
async fn device_directory_lists_the_demo_controller() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/devices").await;

    assert_eq!(
        body,
        json!({
            "devices": [{
                "device_id": 1,
                "dev_eui": "demo",
                "code": "HZ1",
                "description": "Hydroponic Controller",
                "zone_code": "HZ1",
                "zone_label": "Hydro 1",
                "plant_name": "Hidroponik"
            }],
            "count": 1
        })
    );
}

#[tokio::test]
async fn sensor_listing_follows_sensor_order() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/devices/HZ1/sensors").await;

    assert_eq!(
        body,
        json!({
            "device_code": "HZ1",
            "sensors": [
                {
                    "device_sensor_id": 1,
                    "sensor_label": "pH",
                    "sensor_order": 1,
                    "sensor_type": "pH",
                    "unit": "",
                    "sensor_model": "HX"
                },
                {
                    "device_sensor_id": 2,
                    "sensor_label": "TDS",
                    "sensor_order": 2,
                    "sensor_type": "TDS",
                    "unit": "ppm",
                    "sensor_model": "HX"
                },
                {
                    "device_sensor_id": 3,
                    "sensor_label": "Temperature",
                    "sensor_order": 3,
                    "sensor_type": "Temperature",
                    "unit": "°C",
                    "sensor_model": "DS18B20"
                }
            ]
        })
    );
}

#[tokio::test]
async fn plant_listing_counts_zones() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/api/plants").await;

    assert_eq!(
        body,
        json!({
            "plants": [{
                "plant_id": 1,
                "name": "Hidroponik",
                "media_type": "Hidroponik",
                "description": "Demo",
                "zone_count": 1
            }],
            "count": 1
        })
    );
}

#[tokio::test]
async fn health_reports_the_dummy_database() {
    let addr = spawn_server().await;
    let body = get_json(addr, "/health").await;

    assert_eq!(body, json!({"status": "healthy", "database": "dummy"}));
}

#[tokio::test]
async fn api_key_checks_are_bypassed() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    // Even a wrong key passes; no key is configured at all
    let resp = client
        .get(format!("http://{addr}/api/devices"))
        .header("X-API-KEY", "wrong")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}
