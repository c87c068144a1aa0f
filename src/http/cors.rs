//! CORS handling.
//!
//! `OPTIONS` is answered locally before routing and never forwarded.
//! Every other response gets `Access-Control-Allow-Origin: *` unless the
//! upstream already chose a value.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS, PUT, DELETE, PATCH";

/// Preflight cache lifetime: 24 hours.
pub const MAX_AGE_SECS: u32 = 86_400;

/// Middleware short-circuiting preflight requests.
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "CORS preflight");
        return preflight_response();
    }
    next.run(request).await
}

/// 204 response granting every origin, the fixed method set and all headers.
pub fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    let headers = response.headers_mut();
    let methods = HeaderValue::from_static(ALLOWED_METHODS);
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(MAX_AGE_SECS));
    headers.insert(header::ALLOW, methods);
    response
}

/// Layer adding `Access-Control-Allow-Origin: *` where absent.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    )
}
