//! Utility functions

/// Parse the `Retry-After` header as integer seconds
///
/// A missing or malformed header yields `None`; it never fails the caller.
pub fn parse_retry_after(headers: &http::HeaderMap) -> Option<u64> {
    headers
        .get(http::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Generate a new request ID
pub fn generate_request_id() -> String {
    format!("sdk-{}", uuid::Uuid::new_v4())
}

/// URL encode a path segment
pub fn encode_path(s: &str) -> String {
    use percent_encoding::{AsciiSet, CONTROLS};

    const FRAGMENT: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'<')
        .add(b'>')
        .add(b'`')
        .add(b'#')
        .add(b'?')
        .add(b'{')
        .add(b'}')
        .add(b'/')
        .add(b'%');

    percent_encoding::utf8_percent_encode(s, FRAGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after() {
        let mut headers = http::HeaderMap::new();
        let _ = headers.insert(
            http::header::RETRY_AFTER,
            http::HeaderValue::from_static("60"),
        );
        assert_eq!(parse_retry_after(&headers), Some(60));

        let _ = headers.insert(
            http::header::RETRY_AFTER,
            http::HeaderValue::from_static("soon"),
        );
        assert_eq!(parse_retry_after(&headers), None);

        assert_eq!(parse_retry_after(&http::HeaderMap::new()), None);
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("hello world"), "hello%20world");
        assert_eq!(encode_path("test/path"), "test%2Fpath");
        assert_eq!(encode_path("my-project"), "my-project");
        assert_eq!(encode_path("API_KEY"), "API_KEY");
        assert_eq!(encode_path("my.key"), "my.key");
    }

    #[test]
    fn test_request_id_prefix() {
        let id = generate_request_id();
        assert!(id.starts_with("sdk-"));
    }
}
