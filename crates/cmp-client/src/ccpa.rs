//! Typed client for the CCPA endpoints of the wrapper API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/ccpa/message-url?{payload as query}` | Message URL |
//! | POST   | `/ccpa/consent/{actionType}` | Record consent action |

use cmp_core::payload;
use cmp_core::Payload;

use crate::error::CmpApiError;
use crate::transport;

/// Client for the CCPA wrapper endpoints.
#[derive(Debug, Clone)]
pub struct CcpaClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl CcpaClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Request the URL of the CCPA message to render.
    ///
    /// Calls `GET {base_url}/ccpa/message-url` with every top-level field
    /// of `params` flattened into the query string.
    pub async fn message_url(&self, params: &Payload) -> Result<Payload, CmpApiError> {
        let endpoint = "GET /ccpa/message-url";
        let url = format!("{}ccpa/message-url", self.base_url);
        let query = payload::flatten_query(params);

        tracing::debug!(url = %url, params = query.len(), "CCPA wrapper request");
        transport::send_envelope(endpoint, self.http.get(&url).query(&query)).await
    }

    /// Record a CCPA consent action.
    ///
    /// Calls `POST {base_url}/ccpa/consent/{actionType}` where `actionType`
    /// is read from `body`. The whole body is sent as JSON.
    pub async fn consent(&self, body: &Payload) -> Result<Payload, CmpApiError> {
        let action_type =
            payload::action_type(body).ok_or_else(|| CmpApiError::InvalidRequest {
                endpoint: "POST /ccpa/consent".into(),
                reason: "body must carry an actionType".into(),
            })?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CmpApiError::InvalidRequest {
                endpoint: "POST /ccpa/consent".into(),
                reason: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(["ccpa", "consent", action_type.as_str()]);
        let endpoint = format!("POST /ccpa/consent/{action_type}");

        tracing::debug!(url = %url, "CCPA wrapper request");
        transport::send_envelope(&endpoint, self.http.post(url).json(body)).await
    }
}
