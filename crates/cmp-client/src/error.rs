//! Consent relay client error types.

use serde_json::Value;

/// Errors from outbound calls to the wrapper API, geolocation service or CDN.
#[derive(Debug, thiserror::Error)]
pub enum CmpApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Upstream returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Upstream answered 2xx but the envelope carried an `err` field.
    #[error("{endpoint} rejected the request: {err}")]
    Rejected { endpoint: String, err: Value },
    /// Response body was not a JSON object.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
    /// The payload cannot be turned into an upstream request.
    #[error("invalid request for {endpoint}: {reason}")]
    InvalidRequest { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl CmpApiError {
    /// The value reported to callers in the `err` field of a 500 response.
    ///
    /// - `Rejected`: the upstream `err` value, untouched.
    /// - `ApiError`: the body's `err` field if it has one, else the JSON
    ///   body, else the raw body text.
    /// - everything else: the error message.
    pub fn detail(&self) -> Value {
        match self {
            Self::Rejected { err, .. } => err.clone(),
            Self::ApiError { body, .. } if !body.trim().is_empty() => {
                match serde_json::from_str::<Value>(body) {
                    Ok(Value::Object(mut map)) => map
                        .remove(cmp_core::payload::ERR_FIELD)
                        .filter(|v| !v.is_null())
                        .unwrap_or(Value::Object(map)),
                    Ok(other) => other,
                    Err(_) => Value::String(body.clone()),
                }
            }
            other => Value::String(other.to_string()),
        }
    }

    /// HTTP status reported by upstream, if the call got that far.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
