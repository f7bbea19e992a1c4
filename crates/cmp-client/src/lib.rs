//! # cmp-client -- Typed Rust client for the consent relay's upstreams
//!
//! Provides typed access to every service the relay talks to:
//! - **GDPR** (TCF v1 and TCF v2) via the consent-management wrapper API
//! - **CCPA** via the same wrapper API
//! - **Geolocation** via `ip-api.com`, used to classify callers
//! - **CDN** pass-through for the message assets served under `/sp/*`
//!
//! ## Architecture
//!
//! This crate is the only place the relay issues outbound HTTP. Route
//! handlers in `cmp-api` call the sub-clients here and never build
//! upstream URLs themselves.
//!
//! ## Envelope Convention
//!
//! Wrapper API responses are JSON objects. An object with a non-null
//! `err` field is an error envelope and surfaces as
//! [`CmpApiError::Rejected`]; anything else is a success envelope and is
//! returned as a [`cmp_core::Payload`].

pub mod ccpa;
pub mod cdn;
pub mod config;
pub mod error;
pub mod gdpr;
pub mod geo;
pub(crate) mod transport;

pub use config::CmpApiConfig;
pub use error::CmpApiError;
pub use gdpr::TcfVersion;
pub use geo::GeoLookup;

use std::time::Duration;

/// Top-level relay client. Holds one sub-client per upstream.
#[derive(Debug, Clone)]
pub struct CmpClient {
    tcf_v1: gdpr::GdprClient,
    tcf_v2: gdpr::GdprClient,
    ccpa: ccpa::CcpaClient,
    geo: geo::GeoClient,
    cdn: cdn::CdnClient,
}

impl CmpClient {
    /// Create a new client from configuration.
    ///
    /// All sub-clients share one connection pool.
    pub fn new(config: CmpApiConfig) -> Result<Self, CmpApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| CmpApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            tcf_v1: gdpr::GdprClient::new(
                http.clone(),
                config.wrapper_url.clone(),
                TcfVersion::V1,
            ),
            tcf_v2: gdpr::GdprClient::new(
                http.clone(),
                config.wrapper_url.clone(),
                TcfVersion::V2,
            ),
            ccpa: ccpa::CcpaClient::new(http.clone(), config.wrapper_url),
            geo: geo::GeoClient::new(http.clone(), config.geo_url),
            cdn: cdn::CdnClient::new(http, config.cdn_url),
        })
    }

    /// Create a client from `CMP_*` environment variables.
    pub fn from_env() -> Result<Self, CmpApiError> {
        Self::new(CmpApiConfig::from_env()?)
    }

    /// Access the TCF v1 GDPR client.
    pub fn tcf_v1(&self) -> &gdpr::GdprClient {
        &self.tcf_v1
    }

    /// Access the TCF v2 GDPR client.
    pub fn tcf_v2(&self) -> &gdpr::GdprClient {
        &self.tcf_v2
    }

    /// Access the CCPA client.
    pub fn ccpa(&self) -> &ccpa::CcpaClient {
        &self.ccpa
    }

    /// Access the geolocation client.
    pub fn geo(&self) -> &geo::GeoClient {
        &self.geo
    }

    /// Access the CDN pass-through client.
    pub fn cdn(&self) -> &cdn::CdnClient {
        &self.cdn
    }
}
