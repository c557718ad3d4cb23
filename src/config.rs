//! Configuration management for Formgate.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Main configuration for the Formgate service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormgateConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "127.0.0.1:8080".parse().unwrap()
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Maximum contact submissions per window per client
    #[serde(default = "default_contact_limit")]
    pub contact_limit: u32,

    /// Maximum pricing requests per window per client
    #[serde(default = "default_pricing_limit")]
    pub pricing_limit: u32,

    /// Rate limit window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Interval between sweeps of expired entries, in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            contact_limit: default_contact_limit(),
            pricing_limit: default_pricing_limit(),
            window_ms: default_window_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_contact_limit() -> u32 {
    5
}

fn default_pricing_limit() -> u32 {
    3
}

fn default_window_ms() -> u64 {
    // One hour
    60 * 60 * 1000
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl RateLimitingConfig {
    /// Get the rate limit window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Get the sweep interval as a duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl FormgateConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: &str) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: FormgateConfig = serde_yaml::from_str(&contents)
            .map_err(|e| crate::error::FormgateError::Config(e.to_string()))?;
        Ok(config)
    }
}
