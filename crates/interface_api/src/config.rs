//! API configuration

use chrono_tz::Tz;
use core_kernel::Timezone;
use serde::Deserialize;
use std::str::FromStr;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Household timezone; decides what calendar day "today" is when
    /// reconciling
    pub timezone: String,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timezone: "Europe/Amsterdam".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured household timezone
    pub fn household_timezone(&self) -> Result<Timezone, String> {
        Tz::from_str(&self.timezone)
            .map(Timezone::new)
            .map_err(|_| format!("Invalid timezone: {}", self.timezone))
    }
}
