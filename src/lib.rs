//! Krystal: module-based routing core and HTTP front controller.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod module;
pub mod observability;
pub mod routing;

pub use config::schema::AppConfig;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use http::HttpServer;
pub use lifecycle::{Application, Bootstrap, Shutdown, StartupError};
pub use module::{Module, ModuleFactories};
