//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines the defaults
//! for the listen address, the per-request ad cap, logging, and HTTP headers.
//! `AppConfig` is the root configuration struct containing all settings.

use std::net::SocketAddr;
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

use crate::ads::{Ad, AdCatalog, CatalogError, DEFAULT_MAX_ADS_TO_SERVE};

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Ad selections are randomized and health must always be fresh
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Value of the `Server` response header
pub const SERVER_HEADER: &str = formatcp!(
    "{}/{}",
    env!("CARGO_PKG_NAME"),
    env!("CARGO_PKG_VERSION")
);

// =============================================================================
// Shutdown
// =============================================================================

/// Default seconds to keep serving after marking the service unhealthy on
/// shutdown, so load balancers observe the failing probe first
pub const SHUTDOWN_DRAIN_SECS: u64 = 5;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str =
    formatcp!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME"));

/// Service name reported by the health probe
pub const DEFAULT_SERVICE_NAME: &str = "adservice";

/// Default listen host
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 9555;

/// Environment variable that overrides `http.port`
pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Name reported in health probe payloads
    #[serde(default = "AppConfig::default_service_name")]
    pub service_name: String,
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Ad selection settings
    #[serde(default)]
    pub ads: AdsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog content; the built-in catalog is used when empty
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryConfig>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to keep serving with a failing health probe before shutdown
    #[serde(default = "HttpServerConfig::default_shutdown_drain")]
    pub shutdown_drain_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_drain_seconds: Self::default_shutdown_drain(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_drain() -> u64 {
        SHUTDOWN_DRAIN_SECS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdsConfig {
    /// Maximum ads returned per request (default: 2)
    #[serde(default = "AdsConfig::default_max_ads_to_serve")]
    pub max_ads_to_serve: usize,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            max_ads_to_serve: Self::default_max_ads_to_serve(),
        }
    }
}

impl AdsConfig {
    fn default_max_ads_to_serve() -> usize {
        DEFAULT_MAX_ADS_TO_SERVE
    }
}

/// One `[[category]]` section
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub ads: Vec<AdConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdConfig {
    pub redirect_url: String,
    pub text: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// Structured, one JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    fn default_service_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "service_name must not be empty".to_string(),
            ));
        }
        if self.ads.max_ads_to_serve == 0 {
            return Err(ConfigError::Validation(
                "ads.max_ads_to_serve must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Replaces `http.port` with the value of the `PORT` environment
    /// variable, if one was supplied.
    pub fn apply_port_override(&mut self, port: Option<String>) -> Result<(), ConfigError> {
        if let Some(port) = port {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{PORT_ENV_VAR} is not a valid port: {port}"))
            })?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http.host, self.http.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid http.host or http.port '{}:{}': {}",
                    self.http.host, self.http.port, e
                ))
            })
    }

    /// Builds the catalog from the `[[category]]` sections, or returns the
    /// built-in catalog when there are none.
    pub fn build_catalog(&self) -> Result<AdCatalog, CatalogError> {
        if self.categories.is_empty() {
            return Ok(AdCatalog::builtin());
        }

        let mut entries = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            let ads = category
                .ads
                .iter()
                .map(|ad| Ad::new(ad.redirect_url.as_str(), ad.text.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            entries.push((category.name.clone(), ads));
        }
        AdCatalog::from_entries(entries)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.service_name, "adservice");
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 9555);
        assert_eq!(config.http.shutdown_drain_seconds, 5);
        assert_eq!(config.ads.max_ads_to_serve, 2);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_no_categories_selects_builtin_catalog() {
        let config = AppConfig::from_toml_str("").unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.all_ads(), AdCatalog::builtin().all_ads());
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            service_name = "ads-eu"

            [http]
            host = "127.0.0.1"
            port = 8080
            shutdown_drain_seconds = 0

            [ads]
            max_ads_to_serve = 4

            [logging]
            format = "json"

            [[category]]
            name = "kitchen"
            ads = [
                { redirect_url = "/product/1", text = "Mug" },
                { redirect_url = "/product/2", text = "Jar" },
            ]

            [[category]]
            name = "decor"
            ads = [{ redirect_url = "/product/3", text = "Candle" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.service_name, "ads-eu");
        assert_eq!(config.http.shutdown_drain_seconds, 0);
        assert_eq!(config.ads.max_ads_to_serve, 4);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        let catalog = config.build_catalog().unwrap();
        let categories: Vec<_> = catalog.categories().collect();
        assert_eq!(categories, ["kitchen", "decor"]);
        assert_eq!(catalog.ads_for_category("kitchen").len(), 2);
        assert_eq!(catalog.ads_for_category("decor")[0].text(), "Candle");
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let err = AppConfig::from_toml_str("[ads]\nmax_ads_to_serve = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_category_without_ads_is_a_catalog_error() {
        let config = AppConfig::from_toml_str("[[category]]\nname = \"kitchen\"\n").unwrap();
        let err = config.build_catalog().unwrap_err();
        assert!(matches!(err, CatalogError::CategoryWithoutAds(_)));
    }

    #[test]
    fn test_empty_ad_text_is_a_catalog_error() {
        let config = AppConfig::from_toml_str(
            "[[category]]\nname = \"kitchen\"\nads = [{ redirect_url = \"/p\", text = \"\" }]\n",
        )
        .unwrap();
        let err = config.build_catalog().unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField("text")));
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::from_toml_str("").unwrap();

        config.apply_port_override(None).unwrap();
        assert_eq!(config.http.port, 9555);

        config.apply_port_override(Some("7000".to_string())).unwrap();
        assert_eq!(config.http.port, 7000);

        let err = config
            .apply_port_override(Some("not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = AppConfig::from_toml_str("[http]\nhost = \"not a host\"\n").unwrap();
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ads]\nmax_ads_to_serve = 3").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.ads.max_ads_to_serve, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/adservice.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_shipped_default_config() {
        let config = AppConfig::from_toml_str(include_str!("../config/default.toml")).unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.all_ads(), AdCatalog::builtin().all_ads());
    }

    #[test]
    fn test_default_log_filter_names_the_crate() {
        assert_eq!(DEFAULT_LOG_FILTER, "adservice=debug,tower_http=debug");
    }
}
