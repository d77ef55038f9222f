// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and per-provider credential parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration for the aggregation server.
//!
//! Everything is environment-variable driven; a `.env` file is loaded when
//! present. Secrets never appear in [`ServerConfig::summary`] output.

use anyhow::{Context, Result};
use std::env;
use tracing::{info, warn};

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 8090;
/// Default per-provider call budget for fan-out comparisons, in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 4000;
/// Default outbound request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Default outbound connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// USDA FoodData Central connection settings
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    /// API key issued by data.gov; empty means the provider is not ready.
    pub api_key: String,
    /// API base URL, overridable for tests.
    pub base_url: String,
    /// Client-side request budget per minute.
    pub rate_limit_per_minute: u32,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
            rate_limit_per_minute: 30,
        }
    }
}

/// Open Food Facts connection settings
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// API base URL, overridable for tests.
    pub base_url: String,
    /// Budget for the readiness reachability probe, in seconds.
    pub probe_timeout_secs: u64,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://world.openfoodfacts.org".to_owned(),
            probe_timeout_secs: 3,
        }
    }
}

/// Edamam Food Database credentials and connection settings
#[derive(Debug, Clone)]
pub struct EdamamConfig {
    /// Application id, sent on every request.
    pub app_id: String,
    /// Application key, sent on every request.
    pub app_key: String,
    /// API base URL, overridable for tests.
    pub base_url: String,
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            base_url: "https://api.edamam.com/api/food-database/v2".to_owned(),
        }
    }
}

/// Top-level server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub http_port: u16,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Outbound connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Per-provider wall-clock budget for orchestrated calls, in ms.
    pub call_timeout_ms: u64,
    /// Provider preference order for default selection.
    pub provider_order: Vec<String>,
    /// USDA FoodData Central settings.
    pub usda: UsdaConfig,
    /// Open Food Facts settings.
    pub openfoodfacts: OpenFoodFactsConfig,
    /// Edamam settings.
    pub edamam: EdamamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
            provider_order: default_provider_order(),
            usda: UsdaConfig::default(),
            openfoodfacts: OpenFoodFactsConfig::default(),
            edamam: EdamamConfig::default(),
        }
    }
}

fn default_provider_order() -> Vec<String> {
    vec![
        "usda".to_owned(),
        "openfoodfacts".to_owned(),
        "edamam".to_owned(),
        "synthetic".to_owned(),
    ]
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error when a set variable fails to parse.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let defaults = UsdaConfig::default();
        let off_defaults = OpenFoodFactsConfig::default();
        let edamam_defaults = EdamamConfig::default();

        let config = Self {
            http_port: env_var_or("NUTRIHUB_HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())?
                .parse()
                .context("Invalid NUTRIHUB_HTTP_PORT value")?,
            request_timeout_secs: env_var_or(
                "NUTRIHUB_REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )?
            .parse()
            .context("Invalid NUTRIHUB_REQUEST_TIMEOUT_SECS value")?,
            connect_timeout_secs: env_var_or(
                "NUTRIHUB_CONNECT_TIMEOUT_SECS",
                &DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
            )?
            .parse()
            .context("Invalid NUTRIHUB_CONNECT_TIMEOUT_SECS value")?,
            call_timeout_ms: env_var_or(
                "NUTRIHUB_CALL_TIMEOUT_MS",
                &DEFAULT_CALL_TIMEOUT_MS.to_string(),
            )?
            .parse()
            .context("Invalid NUTRIHUB_CALL_TIMEOUT_MS value")?,
            provider_order: env::var("NUTRIHUB_PROVIDER_ORDER")
                .map(|v| parse_provider_order(&v))
                .unwrap_or_else(|_| default_provider_order()),
            usda: UsdaConfig {
                api_key: env::var("USDA_API_KEY").unwrap_or_default(),
                base_url: env_var_or("USDA_BASE_URL", &defaults.base_url)?,
                rate_limit_per_minute: env_var_or(
                    "USDA_RATE_LIMIT_PER_MINUTE",
                    &defaults.rate_limit_per_minute.to_string(),
                )?
                .parse()
                .context("Invalid USDA_RATE_LIMIT_PER_MINUTE value")?,
            },
            openfoodfacts: OpenFoodFactsConfig {
                base_url: env_var_or("OPENFOODFACTS_BASE_URL", &off_defaults.base_url)?,
                probe_timeout_secs: env_var_or(
                    "OPENFOODFACTS_PROBE_TIMEOUT_SECS",
                    &off_defaults.probe_timeout_secs.to_string(),
                )?
                .parse()
                .context("Invalid OPENFOODFACTS_PROBE_TIMEOUT_SECS value")?,
            },
            edamam: EdamamConfig {
                app_id: env::var("EDAMAM_APP_ID").unwrap_or_default(),
                app_key: env::var("EDAMAM_APP_KEY").unwrap_or_default(),
                base_url: env_var_or("EDAMAM_BASE_URL", &edamam_defaults.base_url)?,
            },
        };

        Ok(config)
    }

    /// Configuration summary for startup logging, without secrets.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "NutriHub Server Configuration:\n\
             - HTTP Port: {}\n\
             - Provider Order: {}\n\
             - Call Timeout: {}ms\n\
             - USDA: {}\n\
             - Open Food Facts: {}\n\
             - Edamam: {}",
            self.http_port,
            self.provider_order.join(", "),
            self.call_timeout_ms,
            if self.usda.api_key.is_empty() {
                "No API key"
            } else {
                "Configured"
            },
            self.openfoodfacts.base_url,
            if self.edamam.app_id.is_empty() || self.edamam.app_key.is_empty() {
                "No credentials"
            } else {
                "Configured"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

/// Parse a comma-separated provider preference list
fn parse_provider_order(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
