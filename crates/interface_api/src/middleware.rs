//! Request auditing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;
use uuid::Uuid;

/// Logs every request with a correlation id, method, path, status, and
/// latency
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let started = std::time::Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis();

    info!(
        %request_id,
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms,
        "request handled"
    );

    response
}
