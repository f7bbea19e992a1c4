//! # Route Modules
//!
//! | Prefix             | Module          | Upstream                 |
//! |--------------------|-----------------|--------------------------|
//! | `/tcfv2/v1/gdpr/*` | [`tcfv2`]       | wrapper API, TCF v2      |
//! | `/gdpr/*`          | [`tcfv1`]       | wrapper API, TCF v1      |
//! | `/ccpa/*`          | [`ccpa`]        | wrapper API, CCPA        |
//! | `/all/v1/*`        | [`unified`]     | geolocation + both above |
//! | `/sp/*`            | [`cdn_proxy`]   | CDN                      |

pub mod ccpa;
pub mod cdn_proxy;
pub mod tcfv1;
pub mod tcfv2;
pub mod unified;

use axum::routing::MethodRouter;
use axum::Router;

use crate::state::AppState;

/// Route `path` and `path/` to the same handlers.
pub(crate) fn route_with_slash(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}
