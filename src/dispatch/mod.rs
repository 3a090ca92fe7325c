//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! (method, path)
//!     → redirect table            → 301
//!     → Router::match_path        → RouteMatch
//!     → MapManager                → controller reference
//!     → RouteNotation::to_args    → (class path, action)
//!     → ControllerResolver::call  → 200 with rendered output
//!     → otherwise DefaultRoute    → 404 with fallback output
//! ```
//!
//! # Design Decisions
//! - A route miss is ordinary control flow, never an error
//! - Dispatch is synchronous and touches only read-only state

pub mod controller;
pub mod dispatcher;
pub mod fallback;

pub use controller::{ActionContext, ActionHandler, ActionRegistry, ControllerResolver, ModuleActions};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use fallback::DefaultRoute;
