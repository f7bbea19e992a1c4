//! # Middleware
//!
//! Request tracing for the relay. CORS and the body limit are stock
//! `tower-http` / `axum` layers applied in [`crate::app`].

pub mod tracing_layer;
