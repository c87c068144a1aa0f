//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_hub::config::{ProxyConfig, ServiceConfig};
use api_hub::{HttpServer, Shutdown};
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    response::Response,
    Router,
};
use tokio::net::TcpListener;

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Handle on a running mock upstream.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn authority(&self) -> String {
        self.addr.to_string()
    }
}

/// Start an upstream that records every request and echoes its body back.
///
/// The response carries `x-upstream-path` and two `x-upstream-tag` values so
/// tests can check header relaying.
pub async fn start_echo_upstream() -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .fallback(echo)
        .with_state(captured.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, captured }
}

async fn echo(
    State(captured): State<Arc<Mutex<Vec<CapturedRequest>>>>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    captured.lock().unwrap().push(CapturedRequest {
        method: parts.method,
        path_and_query: path_and_query.clone(),
        headers: parts.headers,
        body: body.clone(),
    });

    Response::builder()
        .status(StatusCode::CREATED)
        .header("x-upstream-path", path_and_query)
        .header("x-upstream-tag", "one")
        .header("x-upstream-tag", "two")
        .body(Body::from(body))
        .unwrap()
}

/// Set when the upstream's response stream is dropped.
#[derive(Clone, Default)]
pub struct DropFlag(Arc<AtomicBool>);

impl DropFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct DropGuard(DropFlag);

impl Drop for DropGuard {
    fn drop(&mut self) {
        (self.0).0.store(true, Ordering::SeqCst);
    }
}

/// Start an upstream that answers every request with an endless chunked
/// body, one chunk every 20ms. The returned flag is set once the server
/// drops that body, i.e. once nobody is reading it anymore.
pub async fn start_streaming_upstream() -> (SocketAddr, DropFlag) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let flag = DropFlag::default();

    let app = Router::new().fallback(endless).with_state(flag.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, flag)
}

async fn endless(State(flag): State<DropFlag>) -> Response {
    let guard = DropGuard(flag);
    let chunks = futures_util::stream::unfold(guard, |guard| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Some((Ok::<_, std::io::Error>(Bytes::from_static(&[b'x'; 512])), guard))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/octet-stream")
        .body(Body::from_stream(chunks))
        .unwrap()
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn service(key: &str, host: String) -> ServiceConfig {
    ServiceConfig {
        key: key.to_string(),
        host,
        paths: vec!["/".to_string()],
        description: format!("{key} test upstream"),
        logo: String::new(),
        direct_url: false,
    }
}

/// Plain-http config routing the given services.
pub fn config(services: Vec<ServiceConfig>) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.scheme = "http".into();
    config.timeouts.connect_secs = 2;
    config.services = services;
    config
}

/// Start the hub on an ephemeral port. Returns its base URL.
pub async fn start_hub(config: ProxyConfig, shutdown: &Shutdown) -> String {
    let listener = TcpListener::bind(config.listener.socket_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).expect("hub failed to build");
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
