//! Consent relay client configuration.
//!
//! Configures base URLs for each outbound service. Defaults point to the
//! production hosts. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;

/// Default consent-management wrapper API.
pub const DEFAULT_WRAPPER_URL: &str = "https://wrapper-api.sp-prod.net";

/// Default IP-geolocation service.
pub const DEFAULT_GEO_URL: &str = "http://ip-api.com";

/// Default CDN host behind `/sp/*`.
pub const DEFAULT_CDN_URL: &str = "https://cdn.privacy-mgmt.com";

/// Configuration for connecting to the relay's outbound services.
#[derive(Debug, Clone)]
pub struct CmpApiConfig {
    /// Base URL for the consent-management wrapper API (GDPR + CCPA).
    pub wrapper_url: Url,
    /// Base URL for the IP-geolocation service.
    pub geo_url: Url,
    /// Base URL for the CDN pass-through.
    pub cdn_url: Url,
    /// Request timeout in seconds. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

impl CmpApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CMP_WRAPPER_URL` (default: `https://wrapper-api.sp-prod.net`)
    /// - `CMP_GEO_URL` (default: `http://ip-api.com`)
    /// - `CMP_CDN_URL` (default: `https://cdn.privacy-mgmt.com`)
    /// - `CMP_TIMEOUT_SECS` (default: unset, no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: Option<u64> = match std::env::var("CMP_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidNumber("CMP_TIMEOUT_SECS".to_string(), raw.clone())
            })?),
            Err(_) => None,
        };

        Ok(Self {
            wrapper_url: env_url("CMP_WRAPPER_URL", DEFAULT_WRAPPER_URL)?,
            geo_url: env_url("CMP_GEO_URL", DEFAULT_GEO_URL)?,
            cdn_url: env_url("CMP_CDN_URL", DEFAULT_CDN_URL)?,
            timeout_secs,
        })
    }

    /// Create a configuration pointing every service at one mock server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` cannot be parsed.
    pub fn local_mock(base: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl("mock".to_string(), e.to_string()))?;
        Ok(Self {
            wrapper_url: url.clone(),
            geo_url: url.clone(),
            cdn_url: url,
            timeout_secs: Some(5),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
}
