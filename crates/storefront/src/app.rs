//! Router assembly.
//!
//! Shared by the binary and the tests so both exercise the same
//! middleware stack. Sentry layers are added by the binary on top.

use std::time::Duration;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::assets::STATIC_PREFIX;
use crate::middleware::{
    REQUEST_ID_HEADER, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::routes;
use crate::services::CartSessionStore;
use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `store` - Session store; pass a clone to share sessions between routers
pub fn build_app(state: AppState, store: CartSessionStore) -> Router {
    let session_layer = create_session_layer(store, state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service(STATIC_PREFIX, static_files)
        .fallback(routes::not_found)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or_default();

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Sessions are in memory, so
/// there is no dependency to check.
async fn health() -> &'static str {
    "ok"
}
