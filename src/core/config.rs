//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.
//!
//! The Melo API key is not part of configuration: it is supplied by the caller on
//! every invocation and never read from the process environment.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default Melo API base URL.
pub const DEFAULT_MELO_BASE_URL: &str = "https://api.notif.immo";

/// Default timeout for a whole upstream request/response cycle.
pub const DEFAULT_MELO_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream Melo API configuration.
    pub melo: MeloConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Upstream Melo API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeloConfig {
    /// Base URL; the search path is appended to it.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MeloConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MELO_BASE_URL.to_string(),
            timeout_secs: DEFAULT_MELO_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "melo-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            melo: MeloConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_MELO_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_MELO_BASE_URL") {
            info!("Melo API base URL overridden: {}", base_url);
            config.melo.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_MELO_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.melo.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_MELO_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.melo.timeout_secs
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_melo_defaults() {
        let config = Config::default();
        assert_eq!(config.melo.base_url, "https://api.notif.immo");
        assert_eq!(config.melo.timeout_secs, 30);
        assert_eq!(config.server.name, "melo-mcp");
    }

    #[test]
    fn test_melo_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_MELO_BASE_URL", "http://localhost:9999");
            std::env::set_var("MCP_MELO_TIMEOUT_SECS", "12");
        }
        let config = Config::from_env();
        assert_eq!(config.melo.base_url, "http://localhost:9999");
        assert_eq!(config.melo.timeout_secs, 12);
        unsafe {
            std::env::remove_var("MCP_MELO_BASE_URL");
            std::env::remove_var("MCP_MELO_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_MELO_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.melo.timeout_secs, DEFAULT_MELO_TIMEOUT_SECS);
        unsafe {
            std::env::remove_var("MCP_MELO_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_no_api_key_in_config() {
        let serialized = serde_json::to_string(&Config::default()).unwrap();
        assert!(!serialized.to_lowercase().contains("api_key"));
    }
}
