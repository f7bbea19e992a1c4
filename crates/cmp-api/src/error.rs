//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error body has the same shape, `{ "err": ... }`, which is what
//! consent-message clients look for.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cmp_client::CmpApiError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Upstream error value, an aggregate `{gdpr?, ccpa?}`, or a message.
    #[schema(value_type = Object)]
    pub err: Value,
}

/// Per-regime error slots of a unified-router failure.
#[derive(Debug, Default, Serialize)]
pub struct AggregateErr {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdpr: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccpa: Option<Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Inbound body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A single upstream call failed (500).
    #[error(transparent)]
    Upstream(#[from] CmpApiError),

    /// One or both calls of a unified-router fan-out failed (500).
    #[error("unified request failed (gdpr: {}, ccpa: {})", .0.gdpr.is_some(), .0.ccpa.is_some())]
    Aggregate(AggregateErr),

    /// The CDN could not be reached (502).
    #[error("CDN unreachable: {0}")]
    Proxy(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Proxy(_) => StatusCode::BAD_GATEWAY,
            Self::Upstream(_) | Self::Aggregate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn err_value(&self) -> Value {
        match self {
            Self::BadRequest(msg) => Value::String(msg.clone()),
            Self::Upstream(e) => e.detail(),
            Self::Aggregate(slots) => serde_json::to_value(slots).unwrap_or(Value::Null),
            Self::Proxy(msg) => Value::String(msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream(e) => tracing::warn!(
                error = %self,
                upstream_status = ?e.upstream_status(),
                "upstream failure"
            ),
            Self::Aggregate(_) | Self::Proxy(_) => {
                tracing::warn!(error = %self, "upstream failure")
            }
            Self::BadRequest(_) => tracing::debug!(error = %self, "rejected request"),
        }

        let body = ErrorBody {
            err: self.err_value(),
        };
        (self.status(), Json(body)).into_response()
    }
}
