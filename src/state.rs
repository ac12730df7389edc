//! Shared application state for request handlers.

use std::sync::Arc;

use crate::ads::AdSelector;
use crate::health::HealthState;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the ad selector (which owns the catalog), the health flag, and the
/// service name reported by the health probe.
#[derive(Clone)]
pub struct AppState {
    pub selector: Arc<AdSelector>,
    pub health: HealthState,
    pub service_name: Arc<str>,
}

impl AppState {
    /// Creates a new application state from the given selector, health flag and service name.
    pub fn new(
        selector: AdSelector,
        health: HealthState,
        service_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            selector: Arc::new(selector),
            health,
            service_name: service_name.into(),
        }
    }
}
