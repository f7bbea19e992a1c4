//! Typed client for the IP-geolocation service.
//!
//! Base URL: `ip-api.com`
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/json/{ip}` | Look up an address |
//!
//! Only `timezone` drives classification. The IP string is sent as given,
//! without syntax validation; the service itself reports malformed input
//! as a failed lookup with no timezone.

use cmp_core::Jurisdiction;
use serde::{Deserialize, Serialize};

use crate::error::CmpApiError;

/// Lookup result from the geolocation service.
///
/// Every field is optional; the service omits most of them on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLookup {
    /// `success` or `fail`.
    #[serde(default)]
    pub status: Option<String>,
    /// IANA timezone name, e.g. `Europe/Berlin`.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    /// Failure reason when `status` is `fail`.
    #[serde(default)]
    pub message: Option<String>,
}

impl GeoLookup {
    /// Jurisdiction implied by the reported timezone.
    pub fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::from_timezone(self.timezone.as_deref())
    }
}

/// Client for the IP-geolocation service.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl GeoClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Look up `ip`.
    ///
    /// Calls `GET {base_url}/json/{ip}`. `ip` is percent-encoded as a
    /// single path segment, so `#`, `?` and `/` never leave it.
    pub async fn lookup(&self, ip: &str) -> Result<GeoLookup, CmpApiError> {
        let endpoint = format!("GET /json/{ip}");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CmpApiError::InvalidRequest {
                endpoint: endpoint.clone(),
                reason: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(["json", ip]);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CmpApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CmpApiError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| CmpApiError::Deserialization {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Classify the caller at `ip`.
    ///
    /// Fails open: any lookup error classifies as [`Jurisdiction::Unknown`]
    /// and is only logged.
    pub async fn classify(&self, ip: &str) -> Jurisdiction {
        match self.lookup(ip).await {
            Ok(lookup) => {
                let jurisdiction = lookup.jurisdiction();
                tracing::debug!(
                    ip,
                    timezone = lookup.timezone.as_deref().unwrap_or("-"),
                    %jurisdiction,
                    "classified caller"
                );
                jurisdiction
            }
            Err(e) => {
                tracing::warn!(ip, "geolocation lookup failed, treating as Unknown: {e}");
                Jurisdiction::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_deserializes_success_payload() {
        let lookup: GeoLookup = serde_json::from_value(serde_json::json!({
            "status": "success",
            "country": "Germany",
            "countryCode": "DE",
            "regionName": "Berlin",
            "timezone": "Europe/Berlin",
            "query": "77.185.42.223"
        }))
        .unwrap();
        assert_eq!(lookup.country_code.as_deref(), Some("DE"));
        assert_eq!(lookup.jurisdiction(), Jurisdiction::Gdpr);
    }

    #[test]
    fn failed_lookup_is_unknown() {
        let lookup: GeoLookup = serde_json::from_value(serde_json::json!({
            "status": "fail",
            "message": "invalid query",
            "query": "foo"
        }))
        .unwrap();
        assert!(lookup.timezone.is_none());
        assert_eq!(lookup.jurisdiction(), Jurisdiction::Unknown);
    }
}
