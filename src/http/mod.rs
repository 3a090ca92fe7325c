//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum catch-all, timeout, trace)
//!     → request.rs (request ID set + propagated, request span)
//!     → Dispatcher::dispatch(method, path)
//!     → response.rs (DispatchOutcome → status, body, Location)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
