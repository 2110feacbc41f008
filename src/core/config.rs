//! Environment-derived configuration
//!
//! Deployment-specific values (service endpoint, OAuth client identifiers,
//! file locations) come from the environment; a `.env` file is honored by
//! the binaries. User-tunable schedule values live in the reminder config
//! file instead, see [`crate::features::reminder::ReminderConfig`].

use anyhow::{anyhow, Result};

/// Default transport timeout for the two canteen requests, in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration shared by the daemon and the login tool
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the canteen service, without a trailing slash
    pub server_url: String,
    /// OAuth client identifier used for the password grant
    pub oauth_client_id: String,
    /// OAuth client secret used for the password grant
    pub oauth_client_secret: String,
    /// Path of the SQLite settings database
    pub database_path: String,
    /// Path of the reminder schedule config file
    pub reminder_config_path: String,
    /// Transport timeout for canteen requests, in seconds
    pub http_timeout_secs: u64,
    /// Default log filter; `RUST_LOG` overrides it
    pub log_level: String,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// `MEALS_SERVER_URL`, `MEALS_OAUTH_CLIENT_ID` and
    /// `MEALS_OAUTH_CLIENT_SECRET` are required; everything else has a
    /// working default.
    pub fn from_env() -> Result<Self> {
        let http_timeout_secs = match std::env::var("MEALS_HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|_| anyhow!("MEALS_HTTP_TIMEOUT_SECS must be a number, got '{value}'"))?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Config {
            server_url: normalize_server_url(&require("MEALS_SERVER_URL")?),
            oauth_client_id: require("MEALS_OAUTH_CLIENT_ID")?,
            oauth_client_secret: require("MEALS_OAUTH_CLIENT_SECRET")?,
            database_path: std::env::var("MEALS_DATABASE_PATH")
                .unwrap_or_else(|_| "mealwatch.db".to_string()),
            reminder_config_path: std::env::var("MEALS_REMINDER_CONFIG_PATH")
                .unwrap_or_else(|_| "reminder.yaml".to_string()),
            http_timeout_secs,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow!("{name} must be set"))
}

/// Strip trailing slashes so endpoint paths can be appended verbatim.
fn normalize_server_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_server_url() {
        assert_eq!(
            normalize_server_url("https://meals.example.com/"),
            "https://meals.example.com"
        );
        assert_eq!(
            normalize_server_url("https://meals.example.com///"),
            "https://meals.example.com"
        );
        assert_eq!(
            normalize_server_url("https://meals.example.com"),
            "https://meals.example.com"
        );
    }
}
