//! Request spans and access logging.
//!
//! One `INFO` span per request carrying method, URI and HTTP version.
//! Completed responses are logged with status and latency in milliseconds,
//! `5xx` responses additionally at `ERROR`:
//!
//! ```text
//! INFO request{method=GET uri=/api/listings?page=2 version=HTTP/1.1}: finished processing request latency=3 ms status=200
//! ```
//!
//! Request headers are never recorded, so bearer tokens stay out of the logs.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Builds the access-log layer applied to the whole router.
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
