//! HTTP middleware for request processing.
//!
//! Provides caller resolution, CORS and observability middleware.

pub mod auth;
pub mod cors;
pub mod tracing;
