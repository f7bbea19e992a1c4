//! Typed client for the GDPR endpoints of the wrapper API.
//!
//! Two TCF generations are served from the same host under different
//! prefixes. All calls are `POST` with a JSON body and the fixed
//! `inApp=true` query flag.
//!
//! | Version | Method | Path |
//! |---------|--------|------|
//! | TCF v1  | POST   | `/gdpr/message-url?inApp=true` |
//! | TCF v1  | POST   | `/gdpr/native-message?inApp=true` |
//! | TCF v1  | POST   | `/gdpr/consent?inApp=true` |
//! | TCF v2  | POST   | `/tcfv2/v1/gdpr/message-url?inApp=true` |
//! | TCF v2  | POST   | `/tcfv2/v1/gdpr/native-message?inApp=true` |
//! | TCF v2  | POST   | `/tcfv2/v1/gdpr/consent?inApp=true` |

use cmp_core::Payload;

use crate::error::CmpApiError;
use crate::transport;

/// Query flag sent on every GDPR call.
const IN_APP: [(&str, &str); 1] = [("inApp", "true")];

/// IAB Transparency & Consent Framework generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcfVersion {
    V1,
    V2,
}

impl TcfVersion {
    /// Path prefix for this generation, relative to the wrapper base URL.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Self::V1 => "gdpr",
            Self::V2 => "tcfv2/v1/gdpr",
        }
    }
}

/// Client for one TCF generation of the GDPR wrapper endpoints.
#[derive(Debug, Clone)]
pub struct GdprClient {
    http: reqwest::Client,
    base_url: url::Url,
    version: TcfVersion,
}

impl GdprClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, version: TcfVersion) -> Self {
        Self {
            http,
            base_url,
            version,
        }
    }

    /// TCF generation this client targets.
    pub fn version(&self) -> TcfVersion {
        self.version
    }

    /// Request the URL of the consent message to render.
    ///
    /// Calls `POST {base_url}/{prefix}/message-url?inApp=true`.
    pub async fn message_url(&self, body: &Payload) -> Result<Payload, CmpApiError> {
        self.post("message-url", body).await
    }

    /// Request the native (in-app) consent message.
    ///
    /// Calls `POST {base_url}/{prefix}/native-message?inApp=true`.
    pub async fn native_message(&self, body: &Payload) -> Result<Payload, CmpApiError> {
        self.post("native-message", body).await
    }

    /// Record the user's consent decision.
    ///
    /// Calls `POST {base_url}/{prefix}/consent?inApp=true`.
    pub async fn consent(&self, body: &Payload) -> Result<Payload, CmpApiError> {
        self.post("consent", body).await
    }

    async fn post(&self, operation: &str, body: &Payload) -> Result<Payload, CmpApiError> {
        let prefix = self.version.path_prefix();
        let endpoint = format!("POST /{prefix}/{operation}");
        let url = format!("{}{prefix}/{operation}", self.base_url);

        tracing::debug!(url = %url, "GDPR wrapper request");
        transport::send_envelope(&endpoint, self.http.post(&url).query(&IN_APP).json(body)).await
    }
}
