//! Configuration management for session-tracker.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{cookie::DEFAULT_COOKIE_NAME, CookieConfig, ServerConfig};
use crate::cli::Args;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Session handling.
    pub session: SessionSection,
    /// Host network lookup.
    pub network: NetworkSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3500,
            graceful_shutdown: true,
        }
    }
}

/// Session configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Issue the companion session cookie.
    pub cookie_enabled: bool,
    /// Companion cookie name.
    pub cookie_name: String,
    /// Companion cookie inactivity lifetime in seconds.
    pub cookie_max_age_secs: i64,
    /// Take the client address from `X-Forwarded-For`.
    pub trust_forwarded_for: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_enabled: true,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_max_age_secs: 120,
            trust_forwarded_for: false,
        }
    }
}

/// Network configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// How long host interface info is cached, in seconds. Zero disables caching.
    pub refresh_secs: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self { refresh_secs: 30 }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or filter directives.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source (for testing).
    pub fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("SESSION_TRACKER_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("SESSION_TRACKER_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(max_age) = var("SESSION_TRACKER_COOKIE_MAX_AGE").and_then(|v| v.parse().ok()) {
            self.session.cookie_max_age_secs = max_age;
        }

        if let Some(trust) = var("SESSION_TRACKER_TRUST_PROXY") {
            self.session.trust_forwarded_for = matches!(
                trust.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(level) = var("SESSION_TRACKER_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if args.no_cookie {
            self.session.cookie_enabled = false;
        }

        if args.trust_proxy {
            self.session.trust_forwarded_for = true;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to ServerConfig for the API server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port);
        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Companion cookie settings.
    pub fn cookie_config(&self) -> Result<CookieConfig, ConfigError> {
        if self.session.cookie_max_age_secs <= 0 {
            return Err(ConfigError::InvalidCookieMaxAge(
                self.session.cookie_max_age_secs,
            ));
        }

        Ok(CookieConfig {
            enabled: self.session.cookie_enabled,
            name: self.session.cookie_name.clone(),
            max_age_secs: self.session.cookie_max_age_secs,
        })
    }

    /// Host network info cache interval.
    pub fn network_refresh(&self) -> Duration {
        Duration::from_secs(self.network.refresh_secs)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
    /// Cookie lifetime must be positive.
    InvalidCookieMaxAge(i64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidHost(host) => write!(f, "invalid host address: {}", host),
            Self::InvalidCookieMaxAge(secs) => {
                write!(f, "cookie max age must be positive, got {}", secs)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
