//! # Custom Extractors
//!
//! Consent payloads are opaque JSON objects, so handlers take them as a
//! [`Payload`] rather than a typed DTO:
//!
//! - [`JsonPayload`] reads the body. An empty body is an empty object;
//!   malformed JSON and non-object bodies are [`AppError::BadRequest`].
//! - [`QueryPayload`] reads the query string, one string field per key.
//! - [`ClientIp`] resolves the caller address for geolocation.

use std::net::{IpAddr, SocketAddr};

use axum::body::Bytes;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use cmp_core::payload;
use cmp_core::Payload;
use serde_json::Value;

use crate::error::AppError;

/// Header set by reverse proxies, leftmost entry being the original client.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Query parameter that overrides the caller address.
pub const IP_QUERY_PARAM: &str = "ip";

/// JSON object request body.
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Payload);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_payload(&bytes).map(Self)
    }
}

/// Parse a request body as a JSON object payload.
pub fn parse_payload(bytes: &[u8]) -> Result<Payload, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;
    payload::from_json(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Query string as a payload of string fields. A repeated key keeps its
/// last value.
#[derive(Debug, Clone, Default)]
pub struct QueryPayload(pub Payload);

impl<S> FromRequestParts<S> for QueryPayload
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let fields = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        Ok(Self(fields))
    }
}

/// Caller address used for geolocation. `None` when no source yields one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self(resolve_client_ip(
            parts.uri.query(),
            &parts.headers,
            remote,
        )))
    }
}

/// Resolve the caller address.
///
/// Priority: `ip` query parameter, then the first `X-Forwarded-For` entry,
/// then the transport remote address. Empty values are skipped.
pub fn resolve_client_ip(
    query: Option<&str>,
    headers: &HeaderMap,
    remote: Option<IpAddr>,
) -> Option<String> {
    let from_query = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .filter(|(k, _)| k == IP_QUERY_PARAM)
            .map(|(_, v)| v.trim().to_string())
            .find(|v| !v.is_empty())
    });

    let forwarded = || {
        headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    from_query
        .or_else(forwarded)
        .or_else(|| remote.map(|ip| ip.to_canonical().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::net::Ipv4Addr;

    fn xff(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static(value));
        headers
    }

    const REMOTE: Option<IpAddr> = Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    #[test]
    fn query_param_wins() {
        let ip = resolve_client_ip(Some("a=1&ip=198.181.163.183"), &xff("77.185.42.223"), REMOTE);
        assert_eq!(ip.as_deref(), Some("198.181.163.183"));
    }

    #[test]
    fn forwarded_for_uses_first_entry() {
        let ip = resolve_client_ip(None, &xff("77.185.42.223, 10.1.1.1, 10.2.2.2"), REMOTE);
        assert_eq!(ip.as_deref(), Some("77.185.42.223"));
    }

    #[test]
    fn remote_address_is_last_resort() {
        let ip = resolve_client_ip(Some("ip="), &HeaderMap::new(), REMOTE);
        assert_eq!(ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn ipv4_mapped_remote_is_canonicalised() {
        let mapped: IpAddr = "::ffff:77.185.42.223".parse().unwrap();
        let ip = resolve_client_ip(None, &HeaderMap::new(), Some(mapped));
        assert_eq!(ip.as_deref(), Some("77.185.42.223"));
    }

    #[test]
    fn nothing_resolves_to_none() {
        assert_eq!(resolve_client_ip(None, &HeaderMap::new(), None), None);
    }

    #[test]
    fn empty_body_is_empty_payload() {
        assert!(parse_payload(b"").unwrap().is_empty());
        assert!(parse_payload(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_bad_request() {
        assert!(matches!(parse_payload(b"{nope"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_payload(b"[1,2]"), Err(AppError::BadRequest(_))));
    }
}
