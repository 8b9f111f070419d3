//! Request ID middleware for request tracing and correlation.
//!
//! Accepts an upstream `x-request-id` (CDN, load balancer) or mints a UUID
//! v4. The ID is recorded on the tracing span, tagged on the Sentry scope,
//! and echoed in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolve the request ID: the upstream header when present, otherwise a
/// fresh UUID v4.
fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);

    // Record in current span for structured logging
    Span::current().record("request_id", &request_id);

    // Set in Sentry scope for error correlation
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Echo to the client so support reports can reference it
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_id_is_kept() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "edge-7f3a")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(resolve_request_id(&request), "edge-7f3a");
    }

    #[test]
    fn missing_id_mints_a_uuid() {
        let request = Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        let id = resolve_request_id(&request);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
