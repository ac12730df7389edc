//! adservice - category-matched ad selection over HTTP
//!
//! The engine lives in [`ads`]: an immutable [`ads::AdCatalog`] owned by an
//! [`ads::AdSelector`] that prefers category matches and falls back to a
//! random sample. [`health::HealthState`] is the shared flag behind the
//! `/health` probe. The remaining modules wire both into an axum service.

pub mod ads;
pub mod app;
pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
