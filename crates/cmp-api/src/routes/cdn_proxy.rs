//! # CDN Pass-through
//!
//! `ANY /sp`, `/sp/` and `/sp/{*path}` are forwarded to the CDN host with
//! the `/sp` prefix removed. Status, end-to-end headers and body come back untouched and
//! the body is streamed rather than buffered. Only a transport failure
//! produces a relay error (`502`).

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use cmp_client::cdn::strip_hop_by_hop;

use crate::error::AppError;
use crate::state::AppState;

/// Mount point of the pass-through.
pub const PREFIX: &str = "/sp";

/// `/sp`, `/sp/` and everything below them go to the CDN.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(PREFIX, any(forward))
        .route("/sp/", any(forward))
        .route("/sp/{*path}", any(forward))
}

/// Upstream path and query for an inbound URI under [`PREFIX`].
pub fn upstream_path(uri: &Uri) -> String {
    let path = uri.path();
    let rest = path.strip_prefix(PREFIX).unwrap_or(path);
    let rest = if rest.is_empty() { "/" } else { rest };
    match uri.query() {
        Some(q) => format!("{rest}?{q}"),
        None => rest.to_string(),
    }
}

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let target = upstream_path(&uri);
    let upstream = state
        .client
        .cdn()
        .forward(method, &target, &headers, body)
        .await
        .map_err(|e| AppError::Proxy(e.to_string()))?;

    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers());
    tracing::debug!(path = %target, status = status.as_u16(), "CDN response");

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_keeps_query() {
        let uri: Uri = "/sp/unified/4.2.0/gdpr-tcf.js?v=3".parse().unwrap();
        assert_eq!(upstream_path(&uri), "/unified/4.2.0/gdpr-tcf.js?v=3");
    }

    #[test]
    fn bare_prefix_maps_to_root() {
        let uri: Uri = "/sp".parse().unwrap();
        assert_eq!(upstream_path(&uri), "/");
        let uri: Uri = "/sp/?v=2".parse().unwrap();
        assert_eq!(upstream_path(&uri), "/?v=2");
    }

    #[test]
    fn only_leading_prefix_is_stripped() {
        let uri: Uri = "/sp/sp/file.css".parse().unwrap();
        assert_eq!(upstream_path(&uri), "/sp/file.css");
    }
}
