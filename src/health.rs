//! Process-wide health flag.
//!
//! The flag starts healthy and may be flipped in either direction at any
//! time. Readers never block: the flag is a single atomic shared by every
//! clone of the handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;

/// Shared handle to the health flag.
#[derive(Debug, Clone)]
pub struct HealthState {
    healthy: Arc<AtomicBool>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthState {
    /// Creates a flag in the healthy state.
    pub fn new() -> Self {
        Self {
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        let previous = self.healthy.swap(healthy, Ordering::AcqRel);
        if previous != healthy {
            tracing::info!(healthy, "Health state changed");
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }

    /// Renders the current state for a probe.
    pub fn report(&self, service: &str) -> HealthReport {
        let status = if self.is_healthy() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        HealthReport {
            status,
            service: service.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Probe payload: `{"status": "healthy"|"unhealthy", "service": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub service: String,
}

impl HealthReport {
    /// 200 when healthy, 503 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_healthy() {
        assert!(HealthState::new().is_healthy());
        assert!(HealthState::default().is_healthy());
    }

    #[test]
    fn test_toggle() {
        let health = HealthState::new();

        health.set_healthy(false);
        assert!(!health.is_healthy());

        health.set_healthy(true);
        assert!(health.is_healthy());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let health = HealthState::new();
        let reader = health.clone();

        health.set_healthy(false);
        assert!(!reader.is_healthy());
    }

    #[test]
    fn test_write_is_visible_across_threads() {
        let health = HealthState::new();
        let writer = health.clone();

        thread::spawn(move || writer.set_healthy(false))
            .join()
            .unwrap();

        assert!(!health.is_healthy());
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let health = HealthState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let health = health.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        health.set_healthy(i % 2 == 0);
                        let _ = health.is_healthy();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        health.set_healthy(true);
        assert!(health.is_healthy());
    }

    #[test]
    fn test_report_healthy() {
        let report = HealthState::new().report("adservice");
        assert_eq!(report.status_code(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "status": "healthy", "service": "adservice" })
        );
    }

    #[test]
    fn test_report_unhealthy() {
        let health = HealthState::new();
        health.set_healthy(false);

        let report = health.report("adservice");
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "status": "unhealthy", "service": "adservice" })
        );
    }
}
