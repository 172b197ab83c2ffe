//! Configuration module for the CrewMatch backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Slack bot token for workspace lookups (lookups degrade when absent)
    pub slack_token: Option<String>,
    /// Base URL of the Slack Web API
    pub slack_api_url: String,
    /// Base URL the client library uses to reach this API
    pub api_url: String,
    /// Directory where the client session state is persisted
    pub session_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("CREWMATCH_DB_PATH")
            .unwrap_or_else(|_| "./data/crewmatch.sqlite".to_string())
            .into();

        let bind_addr = env::var("CREWMATCH_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CREWMATCH_BIND_ADDR format");

        let log_level = env::var("CREWMATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let slack_token = env::var("CREWMATCH_SLACK_TOKEN").ok();

        let slack_api_url = env::var("CREWMATCH_SLACK_API_URL")
            .unwrap_or_else(|_| "https://slack.com/api".to_string());

        let api_url =
            env::var("CREWMATCH_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        let session_dir = env::var("CREWMATCH_SESSION_DIR")
            .unwrap_or_else(|_| "./data/session".to_string())
            .into();

        Self {
            db_path,
            bind_addr,
            log_level,
            slack_token,
            slack_api_url,
            api_url,
            session_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("CREWMATCH_DB_PATH");
        env::remove_var("CREWMATCH_BIND_ADDR");
        env::remove_var("CREWMATCH_LOG_LEVEL");
        env::remove_var("CREWMATCH_SLACK_TOKEN");
        env::remove_var("CREWMATCH_SLACK_API_URL");
        env::remove_var("CREWMATCH_API_URL");
        env::remove_var("CREWMATCH_SESSION_DIR");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/crewmatch.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.slack_token.is_none());
        assert_eq!(config.slack_api_url, "https://slack.com/api");
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.session_dir, PathBuf::from("./data/session"));
    }
}
