//! Random slowdown middleware, used to exercise client timeouts.

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use rand::Rng;
use std::time::Duration;

const MAX_SLOWDOWN_MS: u64 = 3000;

/// Delays every request by a uniformly random time between zero and
/// [`MAX_SLOWDOWN_MS`].
pub async fn slowdown_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let delay_ms = rand::rng().random_range(0..=MAX_SLOWDOWN_MS);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    next.run(request).await
}
