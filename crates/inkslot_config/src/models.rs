// --- File: crates/inkslot_config/src/models.rs ---

use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    30
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Studio Backend Config ---
// The REST backend every call goes to. The token is optional; set it through
// INKSLOT_BACKEND__API_TOKEN rather than a config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String, // Mandatory, e.g. INKSLOT_BACKEND__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_token: Option<String>,
}

// --- Studio Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StudioConfig {
    /// IANA zone name used to turn a calendar date into day bounds.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Backend config is mandatory
    pub backend: BackendConfig,

    #[serde(default)]
    pub studio: StudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
