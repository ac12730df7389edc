//! Service assembly.
//!
//! Turns a loaded `AppConfig` into the pieces `main` needs to serve: the
//! router with its shared state, the listen address and the shutdown drain.
//! Every failure here is a startup error and surfaces as an [`AppError`].

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;

use crate::ads::AdSelector;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::health::HealthState;
use crate::routes::create_router;
use crate::state::AppState;

/// A fully wired service, ready to be served.
pub struct Service {
    pub router: Router,
    pub addr: SocketAddr,
    pub drain: Duration,
}

/// Builds the catalog, selector and router described by `config`.
pub fn build_service(config: &AppConfig, health: HealthState) -> Result<Service, AppError> {
    let addr = config.socket_addr()?;

    // Build the catalog once; it is read-only from here on
    let catalog = config.build_catalog()?;
    for category in catalog.categories() {
        tracing::info!(
            category,
            ads = catalog.ads_for_category(category).len(),
            "Category loaded"
        );
    }

    let selector = AdSelector::new(catalog, config.ads.max_ads_to_serve)?;
    tracing::info!(
        ads = selector.catalog().all_ads().len(),
        max_ads_to_serve = selector.max_ads_to_serve(),
        "Initialized ad selector"
    );

    let state = AppState::new(selector, health, config.service_name.clone());

    Ok(Service {
        router: create_router(state),
        addr,
        drain: Duration::from_secs(config.http.shutdown_drain_seconds),
    })
}
