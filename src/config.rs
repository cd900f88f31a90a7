//! Application configuration
//!
//! Serde defaults with environment-variable overrides. Provider credentials
//! are not configured here; they come from the settings provider at call
//! time so they can change without a restart.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body limit in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Build generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Model provider base URL
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// Per-call model request timeout in milliseconds
    #[serde(default = "default_model_timeout_ms")]
    pub model_timeout_ms: u64,

    /// Model call attempts before giving up
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: usize,

    /// Base backoff in milliseconds, doubled per attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_provider_base_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_model_timeout_ms() -> u64 {
    60_000
}
fn default_retry_attempts() -> usize {
    3
}
fn default_retry_backoff_ms() -> u64 {
    1_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            provider_base_url: default_provider_base_url(),
            model_timeout_ms: default_model_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Config {
    /// Override configuration from environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("ADVISOR_HOST") {
            self.server.host = val;
        }

        if let Ok(val) = std::env::var("ADVISOR_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }

        if let Ok(val) = std::env::var("ADVISOR_MAX_BODY_BYTES") {
            if let Ok(bytes) = val.parse() {
                self.server.max_body_bytes = bytes;
            }
        }

        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_URL") {
            self.advisor.provider_base_url = val;
        }

        if let Ok(val) = std::env::var("ADVISOR_MODEL_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.advisor.model_timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("ADVISOR_RETRY_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                self.advisor.retry_attempts = attempts;
            }
        }

        if let Ok(val) = std::env::var("ADVISOR_RETRY_BACKOFF_MS") {
            if let Ok(ms) = val.parse() {
                self.advisor.retry_backoff_ms = ms;
            }
        }

        self
    }
}

impl AdvisorConfig {
    /// Get model timeout as Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_millis(self.model_timeout_ms)
    }

    /// Get retry backoff as Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
