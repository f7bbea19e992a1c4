//! # cmp-api -- Axum relay for consent-management messages
//!
//! Sits between consent-message clients and the consent-management
//! wrapper API. Clients talk to one origin; the relay forwards GDPR and
//! CCPA calls, geolocates callers for the unified endpoints, proxies the
//! CDN assets and serves the static site.
//!
//! ## API Surface
//!
//! | Prefix               | Module                   | Domain                  |
//! |----------------------|--------------------------|-------------------------|
//! | `/tcfv2/v1/gdpr/*`   | [`routes::tcfv2`]        | GDPR, TCF v2            |
//! | `/gdpr/*`            | [`routes::tcfv1`]        | GDPR, TCF v1            |
//! | `/ccpa/*`            | [`routes::ccpa`]         | CCPA                    |
//! | `/all/v1/*`          | [`routes::unified`]      | Both, by caller location|
//! | `/sp`, `/sp/*`       | [`routes::cdn_proxy`]    | CDN pass-through        |
//! | `/health/*`          | this module              | Health checks           |
//! | anything else        | `ServeDir`               | Static files            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → DefaultBodyLimit → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI document via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.body_limit;

    let relay = Router::new()
        .merge(routes::tcfv2::router())
        .merge(routes::tcfv1::router())
        .merge(routes::ccpa::router())
        .merge(routes::unified::router())
        .merge(routes::cdn_proxy::router())
        .merge(openapi::router())
        .fallback_service(static_files)
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    // Layers go on last so health checks are traced and CORS-enabled too.
    Router::new()
        .merge(health)
        .merge(relay)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(middleware::tracing_layer::layer())
}

/// Liveness check. Always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check. The relay holds no warm-up state, so this matches
/// liveness.
async fn readiness() -> &'static str {
    "ready"
}
