//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use callscribe_store::StoreOptions;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://callscribe.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to listen on.
    pub listen_addr: SocketAddr,
    /// Database connection settings.
    pub store: StoreOptions,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let busy_timeout_ms = parse_or(&lookup, "DATABASE_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;

        if max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_owned(),
            ));
        }

        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        Ok(Self {
            listen_addr,
            store: StoreOptions {
                database_url,
                max_connections,
                busy_timeout: Duration::from_millis(busy_timeout_ms),
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.store.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.store.max_connections, 10);
        assert_eq!(config.store.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://calls.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_BUSY_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.store.database_url, "sqlite://calls.db");
        assert_eq!(config.store.max_connections, 4);
        assert_eq!(config.store.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = config_from(&[("PORT", "eighty")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_max_connections_is_config_error() {
        let result = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
