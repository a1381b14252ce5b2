//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MIDNIGHT_DATA_DIR` - Directory for persisted state (default: `data`)
//! - `MIDNIGHT_OUT_DIR` - Directory the rendered page is written to
//!   (default: `dist`)
//! - `MIDNIGHT_CHECKOUT_LATENCY_MS` - Simulated order gateway latency
//!   (default: 1500)
//! - `MIDNIGHT_AUTH_LATENCY_MS` - Simulated auth backend latency
//!   (default: 1000)
//! - `MIDNIGHT_AUTH_FAILURE_RATE` - Fraction of mock auth requests that fail,
//!   in `[0, 1]` (default: 0.05)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the key-value store writes to
    pub data_dir: PathBuf,
    /// Directory the rendered storefront is written to
    pub out_dir: PathBuf,
    /// Simulated order gateway latency
    pub checkout_latency: Duration,
    /// Simulated auth backend latency
    pub auth_latency: Duration,
    /// Fraction of mock auth requests that fail
    pub auth_failure_rate: f64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable or out
    /// of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("MIDNIGHT_DATA_DIR", "data"));
        let out_dir = PathBuf::from(get_env_or_default("MIDNIGHT_OUT_DIR", "dist"));
        let checkout_latency = parse_millis("MIDNIGHT_CHECKOUT_LATENCY_MS", "1500")?;
        let auth_latency = parse_millis("MIDNIGHT_AUTH_LATENCY_MS", "1000")?;
        let auth_failure_rate = parse_rate("MIDNIGHT_AUTH_FAILURE_RATE", "0.05")?;

        Ok(Self {
            data_dir,
            out_dir,
            checkout_latency,
            auth_latency,
            auth_failure_rate,
        })
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_millis(name: &str, default: &str) -> Result<Duration, ConfigError> {
    let raw = get_env_or_default(name, default);
    let millis = raw
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    Ok(Duration::from_millis(millis))
}

fn parse_rate(name: &str, default: &str) -> Result<f64, ConfigError> {
    let raw = get_env_or_default(name, default);
    let rate = raw
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("{rate} is not in [0, 1]"),
        ));
    }
    Ok(rate)
}
