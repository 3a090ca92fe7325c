//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → redirect.rs (static permanent redirects)
//!     → router.rs (first template that matches)
//!     → matcher.rs (compiled template regex, variable capture)
//!     → Return: RouteMatch or no-match
//!
//! Controller reference → URL:
//!     url.rs → map.rs (template for controller) → placeholder substitution
//!
//! Route Compilation (at startup):
//!     module routes + application routes
//!     → RouteTable (insertion ordered)
//!     → MapManager (read-only queries)
//!     → Router (templates compiled once)
//! ```
//!
//! # Design Decisions
//! - Tables are built at bootstrap and immutable afterwards
//! - Registration order is priority; first match wins
//! - Expected misses are `Option`, structural lookup failures are `MapError`

pub mod error;
pub mod map;
pub mod matcher;
pub mod notation;
pub mod redirect;
pub mod route_match;
pub mod router;
pub mod url;

pub use error::{MapError, RoutingError};
pub use map::{MapManager, RouteOptions, RouteTable};
pub use matcher::PLACEHOLDER;
pub use notation::{ControllerRef, RouteNotation};
pub use route_match::RouteMatch;
pub use router::Router;
pub use url::{QueryEncoding, UrlBuilder};
