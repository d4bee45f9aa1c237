//! Vant Proxy - same-origin API routes.
//!
//! Serves the `/api/...` routes the Vant app calls when it runs without a
//! separate API origin. Each route either forwards to the configured
//! external API or, when none is configured, answers with an empty
//! placeholder (reads) or 503 (writes).
//!
//! The router is built here so tests can drive it in-process; the binary in
//! `main.rs` adds Sentry and serves it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    http::{Method, header::HeaderName},
    middleware::from_fn,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use config::ProxyConfig;
pub use error::AppError;
pub use state::AppState;

use crate::middleware::request_id_middleware;
use crate::services::CLIENT_ID_HEADER;

/// Build the application router with tracing, request IDs and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static("x-client-id"),
        ]);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        client_id = request
                            .headers()
                            .get(CLIENT_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
