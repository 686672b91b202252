//! HTTP surface of the marketplace.
//!
//! Handlers stay thin: they decode the request, resolve the caller, call one
//! service operation and wrap the result in the JSON envelope.
//!
//! # Modules
//!
//! - [`dto`] - Wire shapes and the success envelope
//! - [`handlers`] - Axum handlers per resource
//! - [`middleware`] - Caller resolution, CORS and request tracing
//! - [`routes`] - The `/api` route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
