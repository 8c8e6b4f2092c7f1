//! Application configuration loaded from environment variables.

use std::path::Path;

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

/// Environment file read before `.env`.
pub const CONFIG_ENV_FILE: &str = "config.env";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// Database server host.
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// Database server port.
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    /// Database user.
    pub db_user: String,

    /// Database password.
    #[serde(default)]
    pub db_password: String,

    /// Database (schema) name.
    pub database: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    // === Server Configuration ===
    /// HTTP listening port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

/// Load one env file; missing files are skipped.
pub fn load_env_file(path: impl AsRef<Path>) -> bool {
    dotenvy::from_filename(path).is_ok()
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_max_connections() -> u32 {
    10
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading `config.env` and `.env` first.
    ///
    /// Variables already set in the process environment take precedence.
    pub fn load() -> Result<Self, envy::Error> {
        Self::load_env_files();
        envy::from_env()
    }

    /// Copy `config.env` and `.env` into the process environment.
    ///
    /// Runs before logging is set up so `RUST_LOG` from either file applies.
    pub fn load_env_files() {
        load_env_file(CONFIG_ENV_FILE);
        dotenvy::dotenv().ok();
    }

    /// Build from an explicit list of variables instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.db_user.is_empty() {
            return Err("DB_USER is required".to_string());
        }

        if self.database.is_empty() {
            return Err("DATABASE is required".to_string());
        }

        if self.db_host.is_empty() {
            return Err("DB_HOST must not be empty".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(())
    }

    /// Connection options for the MySQL pool.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.database)
    }

    /// Printable summary with the password masked.
    pub fn redacted_summary(&self) -> Vec<(&'static str, String)> {
        let password = if self.db_password.is_empty() {
            "(empty)".to_string()
        } else {
            "********".to_string()
        };

        vec![
            ("DB_HOST", self.db_host.clone()),
            ("DB_PORT", self.db_port.to_string()),
            ("DB_USER", self.db_user.clone()),
            ("DB_PASSWORD", password),
            ("DATABASE", self.database.clone()),
            ("DB_MAX_CONNECTIONS", self.db_max_connections.to_string()),
            ("PORT", self.port.to_string()),
            ("RUST_LOG", self.rust_log.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_db_host(), "127.0.0.1");
        assert_eq!(default_db_port(), 3306);
        assert_eq!(default_port(), 8081);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn loads_required_and_defaults() {
        let config =
            Config::from_vars(vars(&[("DB_USER", "app"), ("DATABASE", "crud")])).unwrap();

        assert_eq!(config.db_user, "app");
        assert_eq!(config.database, "crud");
        assert_eq!(config.db_password, "");
        assert_eq!(config.port, 8081);
        assert_eq!(config.db_max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn port_is_overridable() {
        let config = Config::from_vars(vars(&[
            ("DB_USER", "app"),
            ("DATABASE", "crud"),
            ("PORT", "9000"),
            ("DB_HOST", "db.internal"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.db_host, "db.internal");
    }

    #[test]
    fn missing_database_fails_to_load() {
        assert!(Config::from_vars(vars(&[("DB_USER", "app")])).is_err());
    }

    #[test]
    fn validate_rejects_empty_user() {
        let config = Config::from_vars(vars(&[("DB_USER", ""), ("DATABASE", "crud")])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_connections() {
        let config = Config::from_vars(vars(&[
            ("DB_USER", "app"),
            ("DATABASE", "crud"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_file_values_reach_process_environment() {
        let path = std::env::temp_dir().join(format!("users-api-{}.env", std::process::id()));
        std::fs::write(&path, "USERS_API_ENV_FILE_CHECK=users_api=trace\n").unwrap();

        assert!(load_env_file(&path));
        assert_eq!(
            std::env::var("USERS_API_ENV_FILE_CHECK").unwrap(),
            "users_api=trace"
        );
        assert!(!load_env_file(path.with_extension("missing")));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn loaded_log_level_reaches_filter() {
        let config = Config::from_vars(vars(&[
            ("DB_USER", "app"),
            ("DATABASE", "crud"),
            ("RUST_LOG", "users_api=trace"),
        ]))
        .unwrap();

        let filter = crate::utils::log_filter(false, Some(&config.rust_log));
        assert!(filter.to_string().contains("users_api=trace"));
    }

    #[test]
    fn summary_masks_password() {
        let config = Config::from_vars(vars(&[
            ("DB_USER", "app"),
            ("DATABASE", "crud"),
            ("DB_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        let summary = config.redacted_summary();
        assert!(summary.iter().all(|(_, v)| v != "hunter2"));
    }
}
