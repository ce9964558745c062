pub mod devices;
pub mod health;
pub mod plants;
pub mod readings;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    response::Response,
    routing::get,
    BoxError, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::error_response;
use crate::services::auth;

/// Per-request deadline, matching the 30-second worker timeout of the
/// previous deployment.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(OpenApi)]
#[openapi(
    paths(
        health::index,
        health::ping,
        health::health,
        readings::list_latest_readings,
        readings::get_device_latest,
        readings::get_device_readings_24h,
        readings::get_device_readings_7d,
        devices::list_devices,
        devices::list_device_sensors,
        plants::list_plants,
    ),
    components(
        schemas(
            health::LandingResponse,
            health::PingResponse,
            readings::LatestReading,
            readings::LatestReadingsResponse,
            readings::ReadingSample,
            readings::DeviceLatestResponse,
            readings::IntervalReadingsResponse,
            readings::DailyAverage,
            readings::DailyAveragesResponse,
            devices::DeviceSummary,
            devices::DevicesResponse,
            devices::DeviceSensor,
            devices::DeviceSensorsResponse,
            plants::PlantSummary,
            plants::PlantsResponse,
        )
    ),
    tags(
        (name = "health", description = "Service and database health"),
        (name = "readings", description = "Stored telemetry readings"),
        (name = "devices", description = "Device directory and sensor assignments"),
        (name = "plants", description = "Plant directory"),
    ),
    info(
        title = "Smart Greenhouse API",
        description = "Read-only telemetry API for the smart greenhouse deployment",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    if state.config.use_dummy_data {
        tracing::warn!("Dummy data mode ENABLED; API key checks are bypassed");
    }

    // Landing page and probes skip the API-key gate
    let open_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/api/ping", get(health::ping));

    let protected_routes = Router::new()
        .route("/api/latest-readings", get(readings::list_latest_readings))
        .route(
            "/api/latest-readings/{device_code}",
            get(readings::get_device_latest),
        )
        .route(
            "/api/{device_code}/24",
            get(readings::get_device_readings_24h),
        )
        .route(
            "/api/{device_code}/7",
            get(readings::get_device_readings_7d),
        )
        .route("/api/devices", get(devices::list_devices))
        .route(
            "/api/devices/{device_code}/sensors",
            get(devices::list_device_sensors),
        )
        .route("/api/plants", get(plants::list_plants))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(open_routes)
        .merge(protected_routes)
        .merge(docs_routes)
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new())
                .layer(HandleErrorLayer::new(handle_request_error))
                .timeout(REQUEST_TIMEOUT),
        )
        .with_state(state)
}

async fn endpoint_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Endpoint not found")
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Maps middleware failures, in practice the request timeout, onto the
/// standard error envelope.
async fn handle_request_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        return error_response(StatusCode::REQUEST_TIMEOUT, "Request timed out");
    }

    tracing::error!(error = %err, "Unhandled middleware error");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
