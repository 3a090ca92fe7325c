//! Module subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     loader.rs (directory scan or static list)
//!     → manager.rs (validate name, look up factory, construct)
//!     → Module::routes()        → prefixed and merged into the route table
//!     → Module::translations()  → merged under the module's namespace
//!     → core_bag.rs (every core module loaded?)
//! ```
//!
//! # Design Decisions
//! - Modules are constructed from an explicit name → factory registry,
//!   never resolved by naming convention at runtime
//! - A listed module without a factory is an optional module that is absent
//! - The loaded set is built once at bootstrap and read-only afterwards

pub mod context;
pub mod core_bag;
pub mod error;
pub mod loader;
pub mod manager;
pub mod paths;
pub mod registry;
pub mod services;
pub mod site;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::dispatch::ModuleActions;
use crate::routing::RouteTable;

pub use context::ModuleContext;
pub use core_bag::CoreBag;
pub use error::ModuleError;
pub use loader::{DirectoryLoader, Loader, StaticLoader};
pub use manager::{ManagerState, ModuleManager};
pub use paths::{AppPaths, PathProvider};
pub use registry::{ModuleFactories, ModuleFactory};
pub use services::ServiceLocator;

/// Key → text pairs of one module for one language.
pub type Translations = HashMap<String, String>;

/// Translations of every loaded module, namespaced by module name.
pub type TranslationTable = IndexMap<String, Translations>;

/// A named unit of the application.
pub trait Module: Send + Sync + 'static {
    /// Routes contributed by this module.
    ///
    /// Controller references are relative (`Controller@action`); the manager
    /// prefixes them with the module name.
    fn routes(&self) -> Option<RouteTable> {
        None
    }

    /// Translations for `language`, if the module ships any.
    fn translations(&self, _language: &str) -> Option<Translations> {
        None
    }

    /// Register the controller actions this module serves.
    fn register_actions(&self, _actions: &mut ModuleActions<'_>) {}
}

/// Module names are structural identifiers: `^[A-Z][a-zA-Z]*$`.
pub fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}
