//! Configuration management
//!
//! Configuration is loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the upstream API base URL
pub const API_URL_ENV: &str = "CIVIC_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream backend configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Admin screen behaviour
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (for cookie-based auth)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Upstream REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every proxied path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional request timeout. Unset means the client waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

impl UpstreamConfig {
    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Settings for the admin screen controllers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Quiet period before a filter change triggers a refetch
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Rows requested per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_page_size() -> u32 {
    10
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables:
    /// - CIVIC_SERVER_HOST
    /// - CIVIC_SERVER_PORT
    /// - CIVIC_SERVER_CORS_ORIGIN
    /// - CIVIC_API_URL
    /// - CIVIC_UPSTREAM_TIMEOUT_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CIVIC_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CIVIC_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("CIVIC_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // An empty value counts as unset, mirroring `VAR || default`
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.upstream.base_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("CIVIC_UPSTREAM_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.upstream.timeout_seconds = Some(timeout);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = self.upstream.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "upstream.base_url must be an http(s) URL, got '{}'",
                self.upstream.base_url
            )));
        }
        // Cookie auth needs credentialed CORS, which a wildcard origin forbids
        if self.server.cors_origin.trim() == "*" {
            return Err(ConfigError::ValidationError(
                "server.cors_origin cannot be '*' because credentials are allowed".to_string(),
            ));
        }
        if self.client.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "client.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared by every test that touches process environment variables.
#[cfg(test)]
pub(crate) static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENV_KEYS: [&str; 5] = [
        "CIVIC_SERVER_HOST",
        "CIVIC_SERVER_PORT",
        "CIVIC_SERVER_CORS_ORIGIN",
        "CIVIC_API_URL",
        "CIVIC_UPSTREAM_TIMEOUT_SECONDS",
    ];

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        let guard = super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        guard
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "http://localhost:3001");
        assert_eq!(config.upstream.timeout_seconds, None);
        assert_eq!(config.client.debounce_ms, 500);
        assert_eq!(config.client.page_size, 10);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "   \n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "upstream:\n  base_url: \"https://api.example.org/\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.upstream.base_url, "https://api.example.org/");
        assert_eq!(config.upstream.normalized_base_url(), "https://api.example.org");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.client.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_invalid_yaml_reports_location() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to parse"));
        assert!(msg.contains("line"));
    }

    #[test]
    fn test_load_rejects_non_http_base_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "upstream:\n  base_url: \"ftp://nope\"\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_rejects_wildcard_cors_origin() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  cors_origin: \"*\"\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("cors_origin"));
    }

    #[test]
    fn test_env_wildcard_cors_origin_rejected() {
        let _guard = lock_env();
        std::env::set_var("CIVIC_SERVER_CORS_ORIGIN", "*");

        let result = Config::load_with_env(std::path::Path::new("missing.yml"));
        std::env::remove_var("CIVIC_SERVER_CORS_ORIGIN");

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_env_overrides_api_url() {
        let _guard = lock_env();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "upstream:\n  base_url: \"http://file-value:1\"\n").unwrap();

        std::env::set_var("CIVIC_API_URL", "http://10.0.0.5:3001");
        std::env::set_var("CIVIC_UPSTREAM_TIMEOUT_SECONDS", "15");
        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.upstream.base_url, "http://10.0.0.5:3001");
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(15)));

        std::env::remove_var("CIVIC_API_URL");
        std::env::remove_var("CIVIC_UPSTREAM_TIMEOUT_SECONDS");
    }

    #[test]
    fn test_empty_api_url_env_falls_back_to_default() {
        let _guard = lock_env();
        std::env::set_var("CIVIC_API_URL", "");

        let config = Config::load_with_env(std::path::Path::new("missing.yml")).unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:3001");

        std::env::remove_var("CIVIC_API_URL");
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("CIVIC_SERVER_PORT", "not_a_number");
        std::env::set_var("CIVIC_SERVER_HOST", "127.0.0.1");
        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");

        std::env::remove_var("CIVIC_SERVER_PORT");
        std::env::remove_var("CIVIC_SERVER_HOST");
    }
}
