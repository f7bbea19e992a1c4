//! # Jurisdiction Tags & Regulatory Regimes
//!
//! A [`Jurisdiction`] is the legal context a caller is assumed to be in,
//! derived per request from the timezone the geolocation service reports
//! for the caller's IP. A [`Regime`] is one of the two upstream consent
//! families the relay can call (GDPR and CCPA).
//!
//! ## Classification
//!
//! Timezone prefixes are matched in order, first match wins:
//!
//! | Prefix     | Tag       | Region |
//! |------------|-----------|--------|
//! | `America`  | `CCPA`    | `US`   |
//! | `Europe`   | `GDPR`    | `EUR`  |
//! | otherwise  | `Unknown` | `Unknown` |
//!
//! A missing timezone classifies as `Unknown`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Legal jurisdiction resolved for a caller.
///
/// Serializes to the canonical vocabulary `"GDPR" | "CCPA" | "Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// EU caller; GDPR applies.
    #[serde(rename = "GDPR", alias = "EUR")]
    Gdpr,
    /// US caller; CCPA applies.
    #[serde(rename = "CCPA", alias = "US")]
    Ccpa,
    /// Anything else, including failed lookups.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Jurisdiction {
    /// Classify a timezone name such as `Europe/Berlin`.
    pub fn from_timezone(timezone: Option<&str>) -> Self {
        match timezone {
            Some(tz) if tz.starts_with("America") => Self::Ccpa,
            Some(tz) if tz.starts_with("Europe") => Self::Gdpr,
            _ => Self::Unknown,
        }
    }

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gdpr => "GDPR",
            Self::Ccpa => "CCPA",
            Self::Unknown => "Unknown",
        }
    }

    /// Region vocabulary for the same tag (`EUR`, `US`, `Unknown`).
    pub fn region_code(&self) -> &'static str {
        match self {
            Self::Gdpr => "EUR",
            Self::Ccpa => "US",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = CoreError;

    /// Parses either vocabulary, case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GDPR" | "EUR" => Ok(Self::Gdpr),
            "CCPA" | "US" => Ok(Self::Ccpa),
            "Unknown" => Ok(Self::Unknown),
            other => Err(CoreError::UnknownJurisdiction(other.to_string())),
        }
    }
}

/// Upstream regulatory regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// EU General Data Protection Regulation (TCF).
    Gdpr,
    /// California Consumer Privacy Act.
    Ccpa,
}

impl Regime {
    /// Both regimes, in the order the unified router reports them.
    pub const ALL: [Regime; 2] = [Regime::Gdpr, Regime::Ccpa];

    /// Key of this regime's sub-object in client bodies and in unified
    /// responses.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdpr",
            Self::Ccpa => "ccpa",
        }
    }

    /// Name of the boolean flag stamped on this regime's unified result.
    pub fn applies_flag(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdprApplies",
            Self::Ccpa => "ccpaApplies",
        }
    }

    /// The jurisdiction in which this regime applies.
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            Self::Gdpr => Jurisdiction::Gdpr,
            Self::Ccpa => Jurisdiction::Ccpa,
        }
    }

    /// Whether this regime applies to a caller in `jurisdiction`.
    pub fn applies_to(&self, jurisdiction: Jurisdiction) -> bool {
        self.jurisdiction() == jurisdiction
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
