//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The relay is stateless between requests: `AppState` holds only the
//! server configuration and the outbound client. Both are cheap to clone.

use std::path::PathBuf;
use std::sync::Arc;

use cmp_client::config::ConfigError;
use cmp_client::CmpClient;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 80;

/// Default inbound body limit (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory served for every path no route matches.
    pub static_dir: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("."),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: `80`)
    /// - `STATIC_DIR` (default: `.`)
    /// - `BODY_LIMIT_BYTES` (default: `2097152`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: env_number("PORT")?.unwrap_or(defaults.port),
            static_dir: std::env::var_os("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            body_limit: env_number("BODY_LIMIT_BYTES")?.unwrap_or(defaults.body_limit),
        })
    }
}

fn env_number<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber(var.to_string(), raw)),
        Err(_) => Ok(None),
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Typed client for every upstream the relay calls.
    pub client: CmpClient,
}

impl AppState {
    pub fn new(config: AppConfig, client: CmpClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.port, 80);
        assert_eq!(cfg.static_dir, PathBuf::from("."));
        assert_eq!(cfg.body_limit, 2_097_152);
    }

    #[test]
    fn env_number_absent_is_none() {
        let v: Option<u16> = env_number("CMP_API_NONEXISTENT_VAR_12345").unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn env_number_rejects_garbage() {
        std::env::set_var("CMP_API_TEST_BAD_PORT", "eighty");
        let result: Result<Option<u16>, _> = env_number("CMP_API_TEST_BAD_PORT");
        std::env::remove_var("CMP_API_TEST_BAD_PORT");
        assert!(
            matches!(result, Err(ConfigError::InvalidNumber(var, raw)) if var == "CMP_API_TEST_BAD_PORT" && raw == "eighty")
        );
    }
}
