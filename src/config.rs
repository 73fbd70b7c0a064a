//! Configuration loader for the `wardair` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.

use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// PostgreSQL connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Live air-quality feed base URL.
    pub feed_url: String,

    /// API token for the live feed provider.
    pub feed_token: String,

    /// Upper bound on a live feed call, in seconds.
    pub feed_timeout_secs: u32,

    /// Webhook URL alerts are posted to.
    pub alert_webhook_url: String,

    /// Operational recipient named in every alert payload.
    pub alert_recipient: String,

    /// Opaque admin token required on mutating endpoints.
    pub admin_token: String,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string
/// - `LIVE_FEED_URL` – live feed base URL
/// - `LIVE_FEED_TOKEN` – live feed API token
/// - `ALERT_WEBHOOK_URL` – where severe-reading alerts are posted
/// - `ALERT_RECIPIENT` – recipient named in alert payloads
/// - `ADMIN_TOKEN` – token gating create/delete
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `LIVE_FEED_TIMEOUT_SECS` – live feed timeout (default: 10)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = require_env!("DATABASE_URL");
    let feed_url = require_env!("LIVE_FEED_URL");
    let feed_token = require_env!("LIVE_FEED_TOKEN");
    let alert_webhook_url = require_env!("ALERT_WEBHOOK_URL");
    let alert_recipient = require_env!("ALERT_RECIPIENT");
    let admin_token = require_env!("ADMIN_TOKEN");
    let db_pool_max = parse_env_u32!("DB_POOL_MAX", 5);
    let feed_timeout_secs = parse_env_u32!("LIVE_FEED_TIMEOUT_SECS", 10);

    Ok(Config {
        db_url,
        db_pool_max,
        feed_url,
        feed_token,
        feed_timeout_secs,
        alert_webhook_url,
        alert_recipient,
        admin_token,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password and the secret tokens while showing
    /// all configuration values that were loaded.
    pub fn log_config(&self) {
        // ---
        // Mask the password in the database URL for security
        let masked_db_url = if let Some(at_pos) = self.db_url.rfind('@') {
            if let Some(colon_pos) = self.db_url[..at_pos].rfind(':') {
                format!(
                    "{}:****{}",
                    &self.db_url[..colon_pos],
                    &self.db_url[at_pos..]
                )
            } else {
                self.db_url.clone()
            }
        } else {
            self.db_url.clone()
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL           : {}", masked_db_url);
        tracing::info!("  DB_POOL_MAX            : {}", self.db_pool_max);
        tracing::info!("  LIVE_FEED_URL          : {}", self.feed_url);
        tracing::info!("  LIVE_FEED_TOKEN        : ****");
        tracing::info!("  LIVE_FEED_TIMEOUT_SECS : {}", self.feed_timeout_secs);
        tracing::info!("  ALERT_WEBHOOK_URL      : {}", self.alert_webhook_url);
        tracing::info!("  ALERT_RECIPIENT        : {}", self.alert_recipient);
        tracing::info!("  ADMIN_TOKEN            : ****");
    }
}
