//! Integration tests for the data routes against a mocked database.
//!
//! sea-orm's MockDatabase stands in for Postgres, so the not-found branches
//! and row shaping past the auth gate can be exercised without a live pool.
//!
//! Run with: cargo test --test data_routes_test

use std::collections::BTreeMap;
use std::net::SocketAddr;

use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use serde_json::{json, Value as JsonValue};

use greenhouse_api::common::AppState;
use greenhouse_api::config::{Config, Environment};
use greenhouse_api::entity::sensor_readings;
use greenhouse_api::routes::build_router;

const API_KEY: &str = "test-secret";

fn base_config() -> Config {
    Config {
        environment: Environment::Production,
        port: 0,
        database_url: None,
        db_pool_size: 5,
        db_max_overflow: 10,
        api_key: Some(API_KEY.to_string()),
        allow_query_key_fallback: false,
        external_db_api_url: None,
        use_dummy_data: false,
    }
}

async fn spawn_server(db: DatabaseConnection) -> SocketAddr {
    let state = AppState::new(Some(db), base_config());
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

async fn get_authorized(addr: SocketAddr, route: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("http://{addr}{route}"))
        .header("X-API-KEY", API_KEY)
        .send()
        .await
        .expect("request")
}

#[tokio::test]
async fn unknown_device_code_answers_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<sensor_readings::Model>::new()])
        .into_connection();
    let addr = spawn_server(db).await;

    let resp = get_authorized(addr, "/api/latest-readings/NOPE").await;
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let body: JsonValue = resp.json().await.expect("json body");
    assert_eq!(body, json!({"status": "error", "message": "Device not found"}));
}

#[tokio::test]
async fn stored_reading_comes_back_verbatim() {
    let reading = sensor_readings::Model {
        reading_id: 1,
        device_id: 1,
        encoded_data: "01F400C8012C".to_string(),
        timestamp: "2025-09-22T08:00:00Z".parse().expect("valid timestamp"),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![reading]])
        .into_connection();
    let addr = spawn_server(db).await;

    let resp = get_authorized(addr, "/api/latest-readings/HZ1").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: JsonValue = resp.json().await.expect("json body");
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
async fn sensorless_device_answers_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();
    let addr = spawn_server(db).await;

    let resp = get_authorized(addr, "/api/devices/NOPE/sensors").await;
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let body: JsonValue = resp.json().await.expect("json body");
    assert_eq!(
        body,
        json!({"status": "error", "message": "Device not found or no sensors"})
    );
}

#[tokio::test]
async fn sensor_listing_keeps_ascending_sensor_order() {
    // Rows arrive from the database already sorted by sensor_order
    let rows = vec![
        BTreeMap::from([
            ("device_sensor_id", Value::from(10)),
            ("sensor_label", Value::from("pH")),
            ("sensor_order", Value::from(1)),
            ("sensor_type", Value::from("pH")),
            ("unit", Value::from(Some(String::new()))),
            ("sensor_model", Value::from(Some("HX".to_string()))),
        ]),
        BTreeMap::from([
            ("device_sensor_id", Value::from(11)),
            ("sensor_label", Value::from("TDS")),
            ("sensor_order", Value::from(2)),
            ("sensor_type", Value::from("TDS")),
            ("unit", Value::from(Some("ppm".to_string()))),
            ("sensor_model", Value::from(Some("HX".to_string()))),
        ]),
        BTreeMap::from([
            ("device_sensor_id", Value::from(12)),
            ("sensor_label", Value::from("Temperature")),
            ("sensor_order", Value::from(3)),
            ("sensor_type", Value::from("Temperature")),
            ("unit", Value::from(Some("°C".to_string()))),
            ("sensor_model", Value::from(None::<String>)),
        ]),
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();
    let addr = spawn_server(db).await;

    let resp = get_authorized(addr, "/api/devices/HZ1/sensors").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: JsonValue = resp.json().await.expect("json body");
    assert_eq!(body["device_code"], "HZ1");

    let orders: Vec<i64> = body["sensors"]
        .as_array()
        .expect("sensors array")
        .iter()
        .map(|sensor| sensor["sensor_order"].as_i64().expect("sensor_order"))
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);

    assert_eq!(
        body["sensors"][2],
        json!({
            "device_sensor_id": 12,
            "sensor_label": "Temperature",
            "sensor_order": 3,
            "sensor_type": "Temperature",
            "unit": "°C",
            "sensor_model": null
        })
    );
}
