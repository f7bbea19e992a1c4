//! # Error Types
//!
//! Errors raised by the pure helpers in this crate.

use thiserror::Error;

/// Errors from parsing or reshaping consent-relay domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A jurisdiction tag string did not match any known vocabulary.
    #[error("unknown jurisdiction tag: {0:?}")]
    UnknownJurisdiction(String),

    /// A request body was valid JSON but not a JSON object.
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
