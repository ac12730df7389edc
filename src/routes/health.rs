//! Health check endpoint for container orchestration.
//!
//! Returns `200` with `{"status":"healthy",...}` while the health flag is set
//! and `503` with `{"status":"unhealthy",...}` otherwise. The flag is cleared
//! when the process begins a graceful shutdown.

use axum::{
    extract::State,
    http::header::{HeaderValue, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};

use crate::health::{HealthReport, HealthStatus};
use crate::state::AppState;

const JSON_UTF8: &str = "application/json; charset=utf-8";

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
            Json(self),
        )
            .into_response()
    }
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> HealthReport {
    let report = state.health.report(&state.service_name);
    match report.status {
        HealthStatus::Healthy => tracing::debug!("Health check: OK"),
        HealthStatus::Unhealthy => tracing::warn!("Health check: UNHEALTHY"),
    }
    report
}
