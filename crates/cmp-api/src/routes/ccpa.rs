//! # CCPA Routes
//!
//! | Method | Path | Payload source |
//! |--------|------|----------------|
//! | GET    | `/ccpa/message-url` | query string |
//! | POST   | `/ccpa/message-url` | JSON body |
//! | POST   | `/ccpa/consent/{actionType}` | JSON body + path |

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use cmp_core::payload::ACTION_TYPE_FIELD;
use cmp_core::Payload;
use serde_json::Value;

use super::route_with_slash;
use crate::error::AppError;
use crate::extractors::{JsonPayload, QueryPayload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let router = route_with_slash(
        Router::new(),
        "/ccpa/message-url",
        get(message_url_query).post(message_url_body),
    );
    route_with_slash(
        router,
        "/ccpa/consent/{actionType}",
        axum::routing::post(consent),
    )
}

/// GET /ccpa/message-url
#[utoipa::path(
    get,
    path = "/ccpa/message-url",
    responses(
        (status = 200, description = "Message URL envelope"),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "ccpa"
)]
pub async fn message_url_query(
    State(state): State<AppState>,
    QueryPayload(params): QueryPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.ccpa().message_url(&params).await?))
}

/// POST /ccpa/message-url
#[utoipa::path(
    post,
    path = "/ccpa/message-url",
    responses(
        (status = 200, description = "Message URL envelope"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "ccpa"
)]
pub async fn message_url_body(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.ccpa().message_url(&body).await?))
}

/// POST /ccpa/consent/{actionType}
///
/// The path segment overrides any `actionType` in the body.
#[utoipa::path(
    post,
    path = "/ccpa/consent/{actionType}",
    params(("actionType" = String, Path, description = "CCPA consent action")),
    responses(
        (status = 200, description = "Consent recorded"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "ccpa"
)]
pub async fn consent(
    State(state): State<AppState>,
    Path(action_type): Path<String>,
    JsonPayload(mut body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    body.insert(ACTION_TYPE_FIELD.to_string(), Value::String(action_type));
    Ok(Json(state.client.ccpa().consent(&body).await?))
}
