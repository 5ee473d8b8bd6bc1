use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::{debug, info, warn};

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Log every request with a per-process sequence number and its latency
pub async fn log_requests(request: Request, next: Next) -> Response {
    let seq = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    debug!("[req={}] -> {} {}", seq, method, path);

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!("[req={}] <- {} {} {} ({}ms)", seq, method, path, status, elapsed_ms);
    } else {
        info!("[req={}] <- {} {} {} ({}ms)", seq, method, path, status, elapsed_ms);
    }

    response
}
