//! Request ID middleware for request tracing.
//!
//! Ensures every request has a correlation id: a well-formed incoming
//! `X-Request-ID` header is reused, anything else is replaced with a fresh
//! UUID. The id is stored in request extensions and echoed on the response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller-supplied ids are echoed back into responses and logs; cap their
/// length and alphabet instead of trusting the header.
const MAX_REQUEST_ID_LEN: usize = 64;

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn accept_incoming_id(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.len() > MAX_REQUEST_ID_LEN {
        return None;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .then(|| value.to_string())
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_incoming_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_ids_are_reused() {
        assert_eq!(
            accept_incoming_id("req_01J9-abc").as_deref(),
            Some("req_01J9-abc")
        );
        assert_eq!(accept_incoming_id("  padded  ").as_deref(), Some("padded"));
    }

    #[test]
    fn hostile_or_empty_ids_are_replaced() {
        assert!(accept_incoming_id("").is_none());
        assert!(accept_incoming_id("   ").is_none());
        assert!(accept_incoming_id("id with spaces").is_none());
        assert!(accept_incoming_id("não-ascii").is_none());
        assert!(accept_incoming_id(&"x".repeat(65)).is_none());
    }
}
