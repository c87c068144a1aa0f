//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request path
//!     → router.rs (split segments, pick service key)
//!     → registry.rs (key lookup)
//!     → Return: Root | Invalid | Service(Route)
//!
//! Registry Compilation (at startup):
//!     ServiceConfig[]
//!     → ServiceRegistry (ordered entries + key index)
//!     → Freeze behind Arc
//! ```
//!
//! # Design Decisions
//! - Registry built at startup, immutable at runtime
//! - Deterministic: same path always resolves to the same route
//! - Unknown keys never produce a Route

pub mod registry;
pub mod router;

pub use registry::{ServiceEntry, ServiceRegistry};
pub use router::{Resolution, Route, Router};
