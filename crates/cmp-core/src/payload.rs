//! # Consent Payload Reshaping
//!
//! Client bodies and upstream responses are opaque JSON objects. The relay
//! only reshapes them on the way through:
//!
//! - [`merge_regime`] overlays a regime's sub-object (`gdpr` / `ccpa`) on
//!   the top-level fields. Sub-object values win on key collisions.
//! - [`stamp_targeting`] writes the resolved location into
//!   `targetingParams` as a JSON-encoded string.
//! - [`split_err`] separates an upstream error envelope from a success
//!   envelope.
//! - [`flatten_query`] renders a payload as query-string pairs.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::jurisdiction::{Jurisdiction, Regime};

/// An unordered JSON object as sent by clients or returned upstream.
pub type Payload = Map<String, Value>;

/// Field carrying an upstream business error.
pub const ERR_FIELD: &str = "err";

/// Field carrying the JSON-encoded targeting parameters.
pub const TARGETING_PARAMS_FIELD: &str = "targetingParams";

/// CCPA flag controlling the "Do Not Sell" link.
pub const ALWAYS_DISPLAY_DNS_FIELD: &str = "alwaysDisplayDNS";

/// Field selecting the CCPA consent action.
pub const ACTION_TYPE_FIELD: &str = "actionType";

/// Accept a decoded request body as a payload.
///
/// `null` is treated as an empty object.
///
/// # Errors
///
/// Returns [`CoreError::NotAnObject`] for arrays, strings, numbers and
/// booleans.
pub fn from_json(value: Value) -> Result<Payload, CoreError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Payload::new()),
        Value::Array(_) => Err(CoreError::NotAnObject("array")),
        Value::String(_) => Err(CoreError::NotAnObject("string")),
        Value::Number(_) => Err(CoreError::NotAnObject("number")),
        Value::Bool(_) => Err(CoreError::NotAnObject("boolean")),
    }
}

/// Build the payload forwarded for `regime`.
///
/// Starts from the top-level fields of `body` without either regime
/// sub-object, then copies every field of `body[regime.key()]` over it.
/// A sub-object that is absent or not an object contributes nothing.
pub fn merge_regime(body: &Payload, regime: Regime) -> Payload {
    let mut merged: Payload = body
        .iter()
        .filter(|(k, _)| !Regime::ALL.iter().any(|r| r.key() == k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(Value::Object(sub)) = body.get(regime.key()) {
        for (k, v) in sub {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

/// Stamp `targetingParams` with the JSON text of `{"location": <tag>}`.
pub fn stamp_targeting(payload: &mut Payload, location: Jurisdiction) {
    let params = serde_json::json!({ "location": location.as_str() });
    payload.insert(
        TARGETING_PARAMS_FIELD.to_string(),
        Value::String(params.to_string()),
    );
}

/// Stamp the regime's applies flag (`gdprApplies` / `ccpaApplies`).
pub fn mark_applies(payload: &mut Payload, regime: Regime, location: Jurisdiction) {
    payload.insert(
        regime.applies_flag().to_string(),
        Value::Bool(regime.applies_to(location)),
    );
}

/// Split an upstream envelope into success fields or the `err` value.
///
/// An `err` field that is present and not `null` marks the whole envelope
/// as an error; the remaining fields are discarded. A `null` `err` is
/// removed and the rest is a success.
pub fn split_err(mut payload: Payload) -> Result<Payload, Value> {
    match payload.remove(ERR_FIELD) {
        Some(Value::Null) | None => Ok(payload),
        Some(err) => Err(err),
    }
}

/// Render a payload as query-string pairs.
///
/// Strings are used verbatim, `null` becomes the empty string, and every
/// other value is rendered as its JSON text. Percent-encoding is left to
/// the HTTP client.
pub fn flatten_query(payload: &Payload) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect()
}

/// Render the `actionType` field as a path segment, if present.
///
/// Accepts strings and numbers; anything else is treated as absent.
pub fn action_type(payload: &Payload) -> Option<String> {
    match payload.get(ACTION_TYPE_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
