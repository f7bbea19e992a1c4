//! # Request/Response Tracing
//!
//! Configures `tower_http::trace::TraceLayer` so every relayed request
//! gets a span carrying method, path and status.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the relay's `TraceLayer`.
///
/// Spans and response events are emitted at `INFO` so the default
/// `RUST_LOG=info` shows one line per request.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
