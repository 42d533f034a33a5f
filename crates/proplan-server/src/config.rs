//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Activity provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings of the Inven!RA activity provider itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Public base URL used to build launch and analytics URLs.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// JSON file listing the activity parameters.
    #[serde(default = "default_json_params_path")]
    pub json_params_path: PathBuf,

    /// JSON file holding the analytics contract.
    #[serde(default = "default_analytics_schema_path")]
    pub analytics_schema_path: PathBuf,

    /// Optional HTML file replacing the built-in configuration page.
    #[serde(default)]
    pub config_page_path: Option<PathBuf>,

    /// Student identifier reported in mock analytics.
    #[serde(default = "default_student_id")]
    pub student_id: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "proplan_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "https://proplan-activity-provider.onrender.com".to_string()
}

fn default_json_params_path() -> PathBuf {
    PathBuf::from("data/json_params_url.json")
}

fn default_analytics_schema_path() -> PathBuf {
    PathBuf::from("data/analytics_url.json")
}

fn default_student_id() -> String {
    "1001".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            json_params_path: default_json_params_path(),
            analytics_schema_path: default_analytics_schema_path(),
            config_page_path: None,
            student_id: default_student_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PROPLAN_HOST` overrides `server.host`
/// - `PROPLAN_PORT` overrides `server.port`
/// - `PROPLAN_BASE_URL` overrides `provider.base_url`
/// - `PROPLAN_LOG_LEVEL` overrides `logging.level`
/// - `PROPLAN_LOG_JSON` overrides `logging.json` ("true" or "1" enables it)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Ok(host) = std::env::var("PROPLAN_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("PROPLAN_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(base_url) = std::env::var("PROPLAN_BASE_URL") {
        if !base_url.trim().is_empty() {
            config.provider.base_url = base_url;
        }
    }
    if let Ok(level) = std::env::var("PROPLAN_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("PROPLAN_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
