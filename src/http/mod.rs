//! HTTP server module.
//!
//! Binds the listener, serves the router, and handles graceful shutdown:
//! on SIGTERM/SIGINT the health flag is cleared first, the service keeps
//! serving for a short drain period, then stops accepting connections.

mod server;
mod shutdown;

pub use server::start_server;
