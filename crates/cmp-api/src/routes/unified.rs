//! # Unified Router
//!
//! One request drives both regimes. The caller is geolocated, a payload is
//! built per regime, and the TCF v2 and CCPA upstreams are called
//! concurrently. Both calls always run; the response is sent once both
//! have settled.
//!
//! ## Payload construction
//!
//! For each regime the forwarded payload is the body's top-level fields
//! (without the `gdpr` / `ccpa` sub-objects) overlaid with that regime's
//! sub-object. Both payloads carry `targetingParams`; the CCPA payload
//! also carries `alwaysDisplayDNS: false`.
//!
//! ## Aggregation
//!
//! | GDPR | CCPA | Response |
//! |------|------|----------|
//! | ok   | ok   | `200 { gdpr: {..., gdprApplies}, ccpa: {..., ccpaApplies} }` |
//! | err  | any  | `500 { err: { gdpr, ccpa? } }` |
//! | any  | err  | `500 { err: { gdpr?, ccpa } }` |

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use cmp_client::CmpApiError;
use cmp_core::payload::{self, ALWAYS_DISPLAY_DNS_FIELD};
use cmp_core::{Jurisdiction, Payload, Regime};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::route_with_slash;
use crate::error::{AggregateErr, AppError};
use crate::extractors::{ClientIp, JsonPayload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let router = route_with_slash(Router::new(), "/all/v1/message-url", post(message_url));
    route_with_slash(router, "/all/v1/consent", post(consent))
}

/// Success body of the unified endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnifiedResponse {
    /// TCF v2 envelope plus `gdprApplies`.
    #[schema(value_type = Object)]
    pub gdpr: Payload,
    /// CCPA envelope plus `ccpaApplies`.
    #[schema(value_type = Object)]
    pub ccpa: Payload,
}

/// Per-regime payloads for one unified request.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimePayloads {
    pub gdpr: Payload,
    pub ccpa: Payload,
}

impl RegimePayloads {
    /// Build both payloads from the inbound body and resolved location.
    pub fn build(body: &Payload, location: Jurisdiction) -> Self {
        let mut gdpr = payload::merge_regime(body, Regime::Gdpr);
        payload::stamp_targeting(&mut gdpr, location);

        let mut ccpa = payload::merge_regime(body, Regime::Ccpa);
        payload::stamp_targeting(&mut ccpa, location);
        ccpa.insert(ALWAYS_DISPLAY_DNS_FIELD.to_string(), Value::Bool(false));

        Self { gdpr, ccpa }
    }
}

/// Geolocate the caller. No address means no lookup.
async fn locate(state: &AppState, ip: Option<&str>) -> Jurisdiction {
    let location = match ip {
        Some(ip) => state.client.geo().classify(ip).await,
        None => {
            tracing::warn!("no caller address available, treating as Unknown");
            Jurisdiction::Unknown
        }
    };
    tracing::info!(ip = ip.unwrap_or("-"), %location, "resolved caller location");
    location
}

/// Combine the two settled calls into one response.
pub fn aggregate(
    location: Jurisdiction,
    gdpr: Result<Payload, CmpApiError>,
    ccpa: Result<Payload, CmpApiError>,
) -> Result<Json<UnifiedResponse>, AppError> {
    match (gdpr, ccpa) {
        (Ok(mut gdpr), Ok(mut ccpa)) => {
            payload::mark_applies(&mut gdpr, Regime::Gdpr, location);
            payload::mark_applies(&mut ccpa, Regime::Ccpa, location);
            Ok(Json(UnifiedResponse { gdpr, ccpa }))
        }
        (gdpr, ccpa) => Err(AppError::Aggregate(AggregateErr {
            gdpr: gdpr.err().map(|e| e.detail()),
            ccpa: ccpa.err().map(|e| e.detail()),
        })),
    }
}

/// POST /all/v1/message-url
#[utoipa::path(
    post,
    path = "/all/v1/message-url",
    params(("ip" = Option<String>, Query, description = "Caller address override")),
    responses(
        (status = 200, description = "Both message URLs", body = UnifiedResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "One or both upstream calls failed", body = crate::error::ErrorBody),
    ),
    tag = "unified"
)]
pub async fn message_url(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonPayload(body): JsonPayload,
) -> Result<Json<UnifiedResponse>, AppError> {
    let location = locate(&state, ip.as_deref()).await;
    let payloads = RegimePayloads::build(&body, location);
    tracing::debug!(gdpr = ?payloads.gdpr, ccpa = ?payloads.ccpa, "unified message-url payloads");

    let (gdpr, ccpa) = tokio::join!(
        state.client.tcf_v2().message_url(&payloads.gdpr),
        state.client.ccpa().message_url(&payloads.ccpa),
    );
    aggregate(location, gdpr, ccpa)
}

/// POST /all/v1/consent
///
/// The regime matching the caller location records consent; the other
/// fetches its message URL.
#[utoipa::path(
    post,
    path = "/all/v1/consent",
    params(("ip" = Option<String>, Query, description = "Caller address override")),
    responses(
        (status = 200, description = "Consent recorded for the applicable regime", body = UnifiedResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
        (status = 500, description = "One or both upstream calls failed", body = crate::error::ErrorBody),
    ),
    tag = "unified"
)]
pub async fn consent(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonPayload(body): JsonPayload,
) -> Result<Json<UnifiedResponse>, AppError> {
    let location = locate(&state, ip.as_deref()).await;
    let payloads = RegimePayloads::build(&body, location);
    tracing::debug!(gdpr = ?payloads.gdpr, ccpa = ?payloads.ccpa, "unified consent payloads");

    let tcf = state.client.tcf_v2();
    let ccpa_client = state.client.ccpa();
    let gdpr_call = async {
        if Regime::Gdpr.applies_to(location) {
            tcf.consent(&payloads.gdpr).await
        } else {
            tcf.message_url(&payloads.gdpr).await
        }
    };
    let ccpa_call = async {
        if Regime::Ccpa.applies_to(location) {
            ccpa_client.consent(&payloads.ccpa).await
        } else {
            ccpa_client.message_url(&payloads.ccpa).await
        }
    };

    let (gdpr, ccpa) = tokio::join!(gdpr_call, ccpa_call);
    aggregate(location, gdpr, ccpa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Payload {
        payload::from_json(value).unwrap()
    }

    #[test]
    fn build_stamps_both_and_dns_only_on_ccpa() {
        let body = obj(json!({"accountId": 22}));
        let p = RegimePayloads::build(&body, Jurisdiction::Ccpa);

        assert_eq!(p.gdpr["targetingParams"], r#"{"location":"CCPA"}"#);
        assert_eq!(p.ccpa["targetingParams"], r#"{"location":"CCPA"}"#);
        assert_eq!(p.ccpa["alwaysDisplayDNS"], false);
        assert!(!p.gdpr.contains_key("alwaysDisplayDNS"));
    }

    #[test]
    fn build_applies_sub_object_per_regime() {
        let body = obj(json!({
            "propertyHref": "https://top.example",
            "gdpr": {"propertyHref": "https://eu.example"},
            "ccpa": {"alwaysDisplayDNS": true}
        }));
        let p = RegimePayloads::build(&body, Jurisdiction::Gdpr);

        assert_eq!(p.gdpr["propertyHref"], "https://eu.example");
        assert_eq!(p.ccpa["propertyHref"], "https://top.example");
        // The stamp is applied after the merge.
        assert_eq!(p.ccpa["alwaysDisplayDNS"], false);
    }

    #[test]
    fn aggregate_marks_applies_on_success() {
        let Json(resp) = aggregate(
            Jurisdiction::Gdpr,
            Ok(obj(json!({"url": "g"}))),
            Ok(obj(json!({"url": "c"}))),
        )
        .unwrap();
        assert_eq!(resp.gdpr["gdprApplies"], true);
        assert_eq!(resp.ccpa["ccpaApplies"], false);
    }

    #[test]
    fn aggregate_reports_only_failed_slot() {
        let err = aggregate(
            Jurisdiction::Unknown,
            Ok(Payload::new()),
            Err(CmpApiError::Rejected {
                endpoint: "GET /ccpa/message-url".into(),
                err: json!("bad"),
            }),
        )
        .unwrap_err();
        match err {
            AppError::Aggregate(slots) => {
                assert!(slots.gdpr.is_none());
                assert_eq!(slots.ccpa, Some(json!("bad")));
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }
}
