//! Shared send/decode path for wrapper API calls.
//!
//! Every wrapper endpoint answers with a JSON object that is either a
//! success envelope or an error envelope carrying `err`. This module turns
//! a response into exactly one of the two.

use cmp_core::payload::{self, Payload};
use serde_json::Value;

use crate::error::CmpApiError;

/// Send `request` once and decode the envelope. No retry.
pub(crate) async fn send_envelope(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> Result<Payload, CmpApiError> {
    let resp = request.send().await.map_err(|e| CmpApiError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;
    decode_envelope(endpoint, resp).await
}

async fn decode_envelope(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<Payload, CmpApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| CmpApiError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;

    if !status.is_success() {
        tracing::warn!(endpoint, status = status.as_u16(), "upstream returned error status");
        return Err(CmpApiError::ApiError {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            body,
        });
    }

    // 204 and friends: an empty body is an empty success envelope.
    if body.trim().is_empty() {
        return Ok(Payload::new());
    }

    let value: Value =
        serde_json::from_str(&body).map_err(|e| CmpApiError::Deserialization {
            endpoint: endpoint.into(),
            reason: e.to_string(),
        })?;
    let envelope = payload::from_json(value).map_err(|e| CmpApiError::Deserialization {
        endpoint: endpoint.into(),
        reason: e.to_string(),
    })?;

    payload::split_err(envelope).map_err(|err| CmpApiError::Rejected {
        endpoint: endpoint.into(),
        err,
    })
}
