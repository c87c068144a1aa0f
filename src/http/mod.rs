//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs (OPTIONS answered here, never forwarded)
//!     → routing layer resolves the service key
//!     → landing.rs | response.rs (redirect) | error.rs (400)
//!     → proxy.rs (outbound request via request.rs, upstream call)
//!     → response.rs (stream upstream response back)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod landing;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ProxyError, StartupError};
pub use proxy::Dispatcher;
pub use server::HttpServer;
