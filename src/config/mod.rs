//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! krystal.toml
//!     → loader.rs (toml → AppConfig)
//!     → validation.rs (every problem collected, not just the first)
//!     → Bootstrap (modules, routes, redirects, default route)
//!
//! With --watch:
//!     watcher.rs sees the file change
//!     → loader.rs + validation.rs
//!     → server rebuilds the Application and swaps it in
//! ```
//!
//! # Design Decisions
//! - Every section has defaults; a minimal file names the default route and modules
//! - `[[routes]]` entries carry arbitrary extra keys as opaque route options
//! - A config that fails to load or bootstrap never replaces a running one

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, ApplicationConfig, DiscoveryMode, ModulesConfig, ObservabilityConfig, PathsConfig,
    RouteConfig, ServerConfig,
};
pub use validation::ValidationError;
