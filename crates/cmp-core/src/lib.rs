#![deny(missing_docs)]

//! # cmp-core -- Foundational Types for the Consent Relay
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It performs no I/O and has no internal crate dependencies; only
//! `serde`, `serde_json` and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Single [`Jurisdiction`] enum.** One definition, consumed by every
//!    router. The region vocabulary (`EUR`/`US`) is a rendering of the same
//!    tag, not a second classifier.
//!
//! 2. **[`Regime`] names the upstream families.** The relay talks to two
//!    regulatory regimes upstream (GDPR and CCPA). Body sub-object keys and
//!    response flag names hang off the regime so they cannot drift apart.
//!
//! 3. **Payloads stay untyped.** Client bodies and upstream responses are
//!    opaque JSON objects ([`Payload`]). The relay only merges, stamps and
//!    splits them; it never validates their business fields.

pub mod error;
pub mod jurisdiction;
pub mod payload;

pub use error::CoreError;
pub use jurisdiction::{Jurisdiction, Regime};
pub use payload::Payload;
