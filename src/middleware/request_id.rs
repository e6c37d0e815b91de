use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension type for request ID
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags each request with an id, reusing a caller-supplied `X-Request-ID` when it is sane.
/// The trace span picks the id up from the request extensions.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| is_acceptable_id(v))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

fn is_acceptable_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 128
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_ids() {
        assert!(is_acceptable_id("3f2b8c1e-7d4a-4c55-9b1e-2a6f0d9e8c71"));
        assert!(is_acceptable_id("trace_01"));
        assert!(!is_acceptable_id(""));
        assert!(!is_acceptable_id("has spaces"));
        assert!(!is_acceptable_id(&"a".repeat(129)));
    }
}
