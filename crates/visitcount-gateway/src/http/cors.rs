//! CORS response headers.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use visitcount_core::origin::{AllowedOrigins, DEFAULT_ORIGIN};

pub const ALLOW_METHODS: &str = "GET,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const MAX_AGE_SECS: &str = "86400";

/// Non-empty value of a request header, repeated lines joined with `", "`.
///
/// Lines that are not visible ASCII are skipped.
pub fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let joined = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ");
    Some(joined).filter(|v| !v.is_empty())
}

/// The four `Access-Control-*` headers for the given allow-origin.
pub fn cors_headers(allow_origin: &str, origins: &AllowedOrigins) -> [(HeaderName, HeaderValue); 4] {
    // Configured origins are checked at load; request origins came from a header.
    let origin = HeaderValue::from_str(allow_origin)
        .or_else(|_| HeaderValue::from_str(origins.fallback()))
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_ORIGIN));
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, origin),
        (header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS)),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS)),
        (header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS)),
    ]
}
