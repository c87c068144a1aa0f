//! Dispatcher error taxonomy and its HTTP mapping.

use std::error::Error as StdError;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Errors that end a proxied request before upstream headers reach the client.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// First path segment is not a registered service.
    #[error("Invalid service")]
    UnknownService(String),

    /// Registry host and request path do not form a valid URI.
    #[error("invalid upstream target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// DNS, TLS, connect or reset before response headers.
    #[error("{}", error_chain(.source))]
    Upstream {
        target: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::UnknownService(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::UnknownService(_) => self.to_string(),
            other => format!("Error: {}", other),
        };
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain")],
            body,
        )
            .into_response()
    }
}

/// Failures while assembling the server, before any connection is accepted.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to configure upstream TLS: {0}")]
    Tls(#[from] rustls::Error),
}

/// Render an error and all of its sources as `outer: inner: ...`.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
