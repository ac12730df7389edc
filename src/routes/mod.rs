//! HTTP route handlers.
//!
//! Every response is marked `Cache-Control: no-store`: ad selections are
//! randomized and health probes must never be served from a cache.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod ads;
pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL, SERVER};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, SERVER_HEADER};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and response headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ads", get(ads::get_ads).post(ads::post_ads))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            SERVER,
            HeaderValue::from_static(SERVER_HEADER),
        ))
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
