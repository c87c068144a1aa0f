//! Outbound request preparation.
//!
//! # Responsibilities
//! - Filter inbound headers for the upstream hop
//! - Decide whether the inbound body is forwarded
//!
//! # Design Decisions
//! - Only `host`, `connection` and `content-length` are dropped; the client
//!   sets `Host` from the target URI and recomputes framing from the body
//! - Repeated headers stay repeated (`append`, never `insert`)

use axum::http::{header, HeaderMap, Method};

/// Headers that describe the inbound hop rather than the request itself.
pub const EXCLUDED_HEADERS: [header::HeaderName; 3] =
    [header::HOST, header::CONNECTION, header::CONTENT_LENGTH];

/// Copy of `headers` with the hop headers removed.
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if EXCLUDED_HEADERS.contains(name) {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}

/// Whether the inbound body should be streamed upstream.
///
/// POST, PUT and PATCH always stream. Other methods stream only when the
/// client declared a body.
pub fn carries_body(method: &Method, headers: &HeaderMap) -> bool {
    if matches!(*method, Method::POST | Method::PUT | Method::PATCH) {
        return true;
    }
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0)
}
