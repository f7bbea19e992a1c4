//! # GDPR Routes (TCF v1)
//!
//! Legacy TCF v1 endpoints, kept for clients that have not moved to the
//! `/tcfv2` prefix.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use cmp_core::Payload;

use super::route_with_slash;
use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let router = route_with_slash(Router::new(), "/gdpr/message-url", post(message_url));
    route_with_slash(router, "/gdpr/consent", post(consent))
}

#[utoipa::path(
    post,
    path = "/gdpr/message-url",
    responses(
        (status = 200, description = "Message URL envelope"),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "gdpr"
)]
pub async fn message_url(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.tcf_v1().message_url(&body).await?))
}

#[utoipa::path(
    post,
    path = "/gdpr/consent",
    responses(
        (status = 200, description = "Consent recorded"),
        (status = 500, description = "Upstream error", body = crate::error::ErrorBody),
    ),
    tag = "gdpr"
)]
pub async fn consent(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<Payload>, AppError> {
    Ok(Json(state.client.tcf_v1().consent(&body).await?))
}
