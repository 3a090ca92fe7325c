//! Configuration schema definitions.
//!
//! This module defines the complete application configuration.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::routing::RouteOptions;

/// Root configuration for a Krystal application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Application-wide settings (fallback route, language, core modules).
    pub application: ApplicationConfig,

    /// Module discovery settings.
    pub modules: ModulesConfig,

    /// Filesystem layout.
    pub paths: PathsConfig,

    /// Application-level routes, appended after module routes.
    pub routes: Vec<RouteConfig>,

    /// Static permanent redirects (`old → new`).
    pub redirects: HashMap<String, String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Controller invoked when no route matches (`Module:Controller@action`).
    pub default_route: Option<String>,

    /// Language used when merging module translations.
    pub language: String,

    /// Modules that must be loaded for startup to succeed.
    pub core_modules: Vec<String>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            default_route: None,
            language: "en".to_string(),
            core_modules: Vec::new(),
        }
    }
}

/// How module names are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Fixed list from `modules.names`.
    #[default]
    Static,
    /// Subdirectories of `paths.modules_dir`.
    Directory,
}

/// Module discovery configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub discovery: DiscoveryMode,

    /// Module names for static discovery, in load order.
    pub names: Vec<String>,
}

/// Filesystem layout, relative paths resolved against `root`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub root: String,
    pub modules_dir: String,
    pub cache_dir: String,
    pub uploads_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            modules_dir: "modules".to_string(),
            cache_dir: "data/cache".to_string(),
            uploads_dir: "data/uploads".to_string(),
        }
    }
}

/// A single application-level route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URI template, e.g. `/post/(:var)`.
    pub template: String,

    /// Controller reference plus any opaque options.
    #[serde(flatten)]
    pub options: RouteOptions,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
