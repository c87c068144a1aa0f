//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, CORS, body idle timeouts)
//! - Bind server to listener
//! - Dispatch requests: landing page, redirect, 400, or upstream forward

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::http::cors;
use crate::http::error::{ProxyError, StartupError};
use crate::http::landing::LandingPage;
use crate::http::proxy::Dispatcher;
use crate::http::response::redirect_home;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::routing::{Resolution, Router as ServiceRouter, ServiceRegistry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ServiceRouter>,
    pub dispatcher: Dispatcher,
    pub landing: Arc<LandingPage>,
}

/// HTTP server for the API hub.
pub struct HttpServer {
    router: Router,
    services: usize,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        let registry = Arc::new(ServiceRegistry::from_config(&config.services));
        let landing = Arc::new(LandingPage::render(&registry));

        let state = AppState {
            router: Arc::new(ServiceRouter::new(registry)),
            dispatcher: Dispatcher::new(&config)?,
            landing,
        };

        let services = config.services.len();
        let router = Self::build_router(&config, state);
        Ok(Self { router, services })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let idle = Duration::from_secs(config.timeouts.idle_secs);

        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(middleware::from_fn(cors::preflight))
            .layer(cors::allow_any_origin())
            .layer(RequestBodyTimeoutLayer::new(idle))
            .layer(ResponseBodyTimeoutLayer::new(idle))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let peer = request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.to_string())
                    .unwrap_or_default();
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                    peer = %peer,
                )
            }))
    }

    /// The configured Axum router, for serving or in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C, SIGTERM or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            services = self.services,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main handler.
/// Resolves the path and either answers locally or forwards upstream.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (service, response) = match state.router.resolve(&path) {
        Resolution::Root => ("root", state.landing.response()),
        Resolution::Invalid { service } => {
            ("invalid", ProxyError::UnknownService(service).into_response())
        }
        Resolution::Service(route) if route.is_bare() && method == Method::GET => {
            (route.service(), redirect_home())
        }
        Resolution::Service(route) => {
            let response = state
                .dispatcher
                .forward(&route, request)
                .await
                .unwrap_or_else(|e| e.into_response());
            (route.service(), response)
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), service, start_time);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        HttpServer::new(ProxyConfig::default()).unwrap().app()
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_builds_with_default_config() {
        let server = HttpServer::new(ProxyConfig::default());
        assert!(server.is_ok(), "{:?}", server.err());
    }

    #[tokio::test]
    async fn test_landing_page() {
        let response = send(Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html;charset=UTF-8"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("API"));
    }

    #[tokio::test]
    async fn test_unknown_service() {
        let response = send(
            Request::post("/unknownservice/anything")
                .body(Body::from("payload"))
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Invalid service");
    }

    #[tokio::test]
    async fn test_bare_get_redirects_home() {
        for path in ["/github", "/github/"] {
            let response = send(Request::get(path).body(Body::empty()).unwrap()).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[header::LOCATION], "/");
        }
    }

    #[tokio::test]
    async fn test_options_never_routed() {
        for path in ["/", "/unknownservice/x", "/openai/v1/chat/completions", "/github"] {
            let response = send(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(path)
                    .header(header::ORIGIN, "https://app.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT, "path {path}");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(body.is_empty());
        }
    }
}
