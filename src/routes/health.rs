use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::common::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct LandingResponse {
    pub status: String,
    pub service: String,
    #[serde(rename = "try")]
    pub try_paths: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

/// Landing page pointing at the probes
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = LandingResponse),
    ),
    tag = "health"
)]
pub async fn index() -> Json<LandingResponse> {
    Json(LandingResponse {
        status: "ok".to_string(),
        service: "Smart Greenhouse API".to_string(),
        try_paths: vec!["/api/ping".to_string(), "/health".to_string()],
    })
}

/// Liveness probe
///
/// Static payload, no database involved; suitable for uptime monitors.
#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Service is alive", body = PingResponse),
    ),
    tag = "health"
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "healthy".to_string(),
        message: "AMAN".to_string(),
    })
}

/// Database connectivity check
///
/// Runs `SELECT 1` against the pool. Dummy mode reports its backend as
/// "dummy" without touching a database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 500, description = "Database unreachable"),
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Response {
    if state.config.use_dummy_data {
        return Json(json!({"status": "healthy", "database": "dummy"})).into_response();
    }

    let probe = match state.db.as_ref() {
        Some(db) => db
            .query_one(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT 1",
            ))
            .await
            .err()
            .map(|e| e.to_string()),
        None => Some("DATABASE_URL is not configured".to_string()),
    };

    match probe {
        None => Json(json!({"status": "healthy", "database": "connected"})).into_response(),
        Some(error) => {
            tracing::error!(error = %error, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "error": error,
                })),
            )
                .into_response()
        }
    }
}
