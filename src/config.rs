//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no hot reload. The durable
//! per-user settings (sync timestamp, feature flags) live in the settings
//! store, not here.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the health-data gateway API
    pub gateway_url: String,
    /// Bearer token for the health-data gateway
    pub gateway_token: String,
    /// Token the gateway must present on webhook subscription handshakes
    pub webhook_verify_token: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:9090".to_string(),
            gateway_token: "test_gateway_token".to_string(),
            webhook_verify_token: "test_verify_token".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gateway_url: env::var("HEALTH_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:9090".to_string()),
            gateway_token: env::var("HEALTH_GATEWAY_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("HEALTH_GATEWAY_TOKEN"))?,
            webhook_verify_token: env::var("WEBHOOK_VERIFY_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WEBHOOK_VERIFY_TOKEN"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
