//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented JSON routes into one OpenAPI document
//! served at `/openapi.json`. The CDN pass-through and static files are
//! not described.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the relay's JSON surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Consent Relay",
        version = "0.1.0",
        description = "GDPR (TCF v1/v2) and CCPA consent-message relay with geolocation-driven unified endpoints.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // GDPR, TCF v2
        crate::routes::tcfv2::native_message,
        crate::routes::tcfv2::message_url,
        crate::routes::tcfv2::consent,
        // GDPR, TCF v1
        crate::routes::tcfv1::message_url,
        crate::routes::tcfv1::consent,
        // CCPA
        crate::routes::ccpa::message_url_query,
        crate::routes::ccpa::message_url_body,
        crate::routes::ccpa::consent,
        // Unified
        crate::routes::unified::message_url,
        crate::routes::unified::consent,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::unified::UnifiedResponse,
    )),
    tags(
        (name = "gdpr", description = "GDPR consent messages (IAB TCF)"),
        (name = "ccpa", description = "CCPA consent messages"),
        (name = "unified", description = "Both regimes in one call, selected by caller location"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
