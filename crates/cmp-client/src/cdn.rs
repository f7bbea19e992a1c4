//! Pass-through client for the consent-message CDN.
//!
//! Requests are forwarded as-is: method, path, query, body and
//! end-to-end headers. Hop-by-hop headers and `Host` are dropped so the
//! HTTP client can set them for the upstream connection.

use reqwest::header::{self, HeaderMap, HeaderName};
use reqwest::Method;

use crate::error::CmpApiError;

/// Headers that describe one connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

/// Remove hop-by-hop headers, plus any named in `Connection`.
pub fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let named: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if HOP_BY_HOP.contains(name) || named.iter().any(|n| n == name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    // keep-alive is hop-by-hop but has no constant in `http`.
    out.remove("keep-alive");
    out
}

/// Client for the CDN behind `/sp/*`.
#[derive(Debug, Clone)]
pub struct CdnClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl CdnClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Base URL requests are forwarded to.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Forward one request to `{base_url}{path_and_query}`.
    ///
    /// `path_and_query` must start with `/`. The upstream response is
    /// returned whatever its status; only transport failures are errors.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: impl Into<reqwest::Body>,
    ) -> Result<reqwest::Response, CmpApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}{path_and_query}");
        let endpoint = format!("{method} {path_and_query}");

        tracing::debug!(url = %url, "CDN pass-through");
        self.http
            .request(method, &url)
            .headers(strip_hop_by_hop(headers))
            .body(body)
            .send()
            .await
            .map_err(|e| CmpApiError::Http {
                endpoint,
                source: e,
            })
    }
}
