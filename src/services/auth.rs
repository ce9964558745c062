use axum::{
    extract::{ConnectInfo, Query, Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::common::AppState;
use crate::error::ApiError;

/// API-key gate for the protected routes.
///
/// The key arrives in the `X-API-KEY` header; the `key` query parameter is
/// honored only when `ALLOW_QUERY_KEY_FALLBACK` is enabled. Dummy mode
/// bypasses the check entirely so demos run without secrets. With no key
/// configured, every request is rejected.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.use_dummy_data {
        return next.run(request).await;
    }

    let Some(expected) = state.config.api_key.as_deref() else {
        tracing::error!(
            client_ip = %client_ip(&request),
            "API key is not configured; rejecting request"
        );
        return ApiError::Unauthorized.into_response();
    };

    let authorized = provided_key(&request, state.config.allow_query_key_fallback)
        .is_some_and(|key| constant_time_eq(key.as_bytes(), expected.as_bytes()));

    if authorized {
        return next.run(request).await;
    }

    tracing::warn!(
        client_ip = %client_ip(&request),
        path = %request.uri().path(),
        "Unauthorized request"
    );
    ApiError::Unauthorized.into_response()
}

fn provided_key(request: &Request, allow_query_fallback: bool) -> Option<String> {
    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    header_key.or_else(|| {
        if allow_query_fallback {
            query_key(request.uri())
        } else {
            None
        }
    })
}

/// Form-urlencoded decoding, so a configured key holding reserved
/// characters still matches its `%XX`-escaped form on the wire.
fn query_key(uri: &Uri) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove("key")
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Best-effort client address for auth logs.
/// Tries X-Forwarded-For, X-Real-IP, then peer address, then falls back to localhost.
fn client_ip(request: &Request) -> IpAddr {
    if let Some(xff) = request.headers().get("x-forwarded-for") {
        if let Ok(xff_str) = xff.to_str() {
            // Take the first IP in the chain
            if let Some(first_ip) = xff_str.split(',').next() {
                if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                    return ip;
                }
            }
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            if let Ok(ip) = ip_str.parse::<IpAddr>() {
                return ip;
            }
        }
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip();
    }

    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
