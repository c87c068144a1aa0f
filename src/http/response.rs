//! Response relaying.
//!
//! # Responsibilities
//! - Hand the upstream status and headers to the client unchanged
//! - Stream the upstream body chunk by chunk, in order
//! - Log upstream failures that happen after headers were committed
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - A mid-stream failure truncates the body; the status is already sent
//! - Dropping the relayed body drops the upstream connection

use axum::body::{Body, Bytes, HttpBody};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use futures_util::TryStreamExt;

/// Relay an upstream response to the client without touching status or headers.
pub fn relay<B>(target: String, response: Response<B>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (parts, body) = response.into_parts();
    let stream = Body::new(body).into_data_stream().inspect_err(move |error| {
        tracing::warn!(target = %target, error = %error, "Upstream response stream failed");
    });
    Response::from_parts(parts, Body::from_stream(stream))
}

/// 302 back to the landing page.
pub fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
