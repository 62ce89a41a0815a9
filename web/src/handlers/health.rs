//! Health check endpoint.

use axum::http::StatusCode;

/// Liveness probe.
///
/// Returns 200 OK to indicate the service is running. Neither the store nor
/// the generator is contacted.
///
/// # Endpoint
///
/// ```text
/// GET {prefix}health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
