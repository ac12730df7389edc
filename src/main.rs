//! adservice: category-matched ad selection.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, builds the ad catalog and selector, sets up the
//! Axum router, and serves until a shutdown signal arrives. Startup errors
//! are logged and the process exits non-zero.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adservice::app::build_service;
use adservice::config::{
    AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER, PORT_ENV_VAR,
};
use adservice::health::HealthState;
use adservice::http::start_server;
use adservice::AppError;

/// adservice: serves ads matching the supplied context categories
#[derive(Parser, Debug)]
#[command(name = "adservice", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "adservice=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, format: LogFormat) {
    let (text, json) = match format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter))
        .with(text)
        .with(json)
        .init();
}

async fn run(args: Args) -> Result<(), AppError> {
    // Load configuration first: it selects the log format
    let mut config = AppConfig::load(&args.config)?;
    config.apply_port_override(std::env::var(PORT_ENV_VAR).ok())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    tracing::info!(path = %args.config, "Loaded configuration");

    let health = HealthState::new();
    let service = build_service(&config, health.clone())?;

    start_server(service.router, service.addr, health, service.drain).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Config errors can happen before the subscriber is installed
            if tracing::dispatcher::has_been_set() {
                tracing::error!(error = %err, "adservice exited with an error");
            } else {
                eprintln!("adservice: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
