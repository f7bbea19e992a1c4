//! # GDPR Routes (TCF v2)
//!
//! Pass-through of the TCF v2 wrapper endpoints. The JSON body is
//! forwarded unchanged and the upstream envelope is relayed: `200` with
//! the success fields, or `500 { "err": ... }`.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use cmp_core::Payload;

use super::route_with_slash;
use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::state::AppState;

/// Build the TCF v2 router.
pub fn router() -> Router<AppState> {
    let router = Router::new();
    let router = route_with_slash(router, "/tcfv2/v1/gdpr/native-message", post(native_message));
    let router = route_with_slash(router, "/tcfv2/v1/gdpr/message-url", post(message_url));
    route_with_slash(router, "/tcfv2/v1/gdpr/consent", post(consent))
}

/// POST /tcfv2/v1/gdpr/native-message
#[utoipa::path(
    post,
    path = "/tcfv2/v1/gdpr/native-message",
    responses(
        (status = 200, description = "Native message envelope"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "gdpr"
)]
pub async fn native_message(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.tcf_v2().native_message(&body).await?))
}

/// POST /tcfv2/v1/gdpr/message-url
#[utoipa::path(
    post,
    path = "/tcfv2/v1/gdpr/message-url",
    responses(
        (status = 200, description = "Message URL envelope"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "gdpr"
)]
pub async fn message_url(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.tcf_v2().message_url(&body).await?))
}

/// POST /tcfv2/v1/gdpr/consent
#[utoipa::path(
    post,
    path = "/tcfv2/v1/gdpr/consent",
    responses(
        (status = 200, description = "Consent recorded"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "gdpr"
)]
pub async fn consent(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.tcf_v2().consent(&body).await?))
}
