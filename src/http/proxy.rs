//! Upstream dispatch.
//!
//! # Responsibilities
//! - Build the outbound URI from a resolved route and the raw query string
//! - Copy filtered headers and stream the request body
//! - Issue the call over the shared pooled client
//! - Relay the upstream response, or translate failures into `ProxyError`
//!
//! # Design Decisions
//! - Only accepts a `Route`, so unknown services never get here
//! - No retries, no caching, no payload changes
//! - Bodies are never buffered in either direction

use std::str::FromStr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Uri},
    response::Response,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::{TokioExecutor, TokioTimer},
};

use crate::config::ProxyConfig;
use crate::http::error::{error_chain, ProxyError, StartupError};
use crate::http::request::{carries_body, forwarded_headers};
use crate::http::response::relay;
use crate::routing::Route;

/// Pooled upstream client. TLS via rustls with webpki roots, HTTP/1.1.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Forwards resolved requests to their upstream.
#[derive(Clone)]
pub struct Dispatcher {
    client: UpstreamClient,
    scheme: String,
}

impl Dispatcher {
    /// Build the pooled client with the ring provider passed explicitly,
    /// never the process-level default.
    pub fn new(config: &ProxyConfig) -> Result<Self, StartupError> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));

        let https = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(Duration::from_secs(config.timeouts.idle_secs))
            .build(https);

        Ok(Self {
            client,
            scheme: config.upstream.scheme.clone(),
        })
    }

    /// `{scheme}://{host}{path}{?query}` for a route.
    pub fn target_uri(&self, route: &Route<'_>, query: Option<&str>) -> Result<Uri, ProxyError> {
        let mut target = format!(
            "{}://{}{}",
            self.scheme,
            route.entry().host,
            route.upstream_path()
        );
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }
        Uri::from_str(&target).map_err(|source| ProxyError::InvalidTarget { target, source })
    }

    /// Execute one upstream round-trip for `request`.
    pub async fn forward(
        &self,
        route: &Route<'_>,
        request: Request<Body>,
    ) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let target = self.target_uri(route, parts.uri.query())?;
        let target_str = target.to_string();

        tracing::info!(
            service = %route.service(),
            method = %parts.method,
            target = %target_str,
            "Proxying request"
        );

        let body = if carries_body(&parts.method, &parts.headers) {
            body
        } else {
            Body::empty()
        };

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = target;
        *outbound.headers_mut() = forwarded_headers(&parts.headers);

        // No deadline around the whole call: it resolves only after the request
        // body is sent, so long uploads are bounded by the per-frame idle timeout.
        let response = match self.client.request(outbound).await {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(
                    service = %route.service(),
                    target = %target_str,
                    error = %error_chain(&source),
                    "Upstream request failed"
                );
                return Err(ProxyError::Upstream {
                    target: target_str,
                    source,
                });
            }
        };

        tracing::debug!(
            target = %target_str,
            status = %response.status(),
            "Upstream responded"
        );

        Ok(relay(target_str, response))
    }
}
