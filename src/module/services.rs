//! Service lookup shared with modules and controllers.
//!
//! Templating, sessions, caches and the like live behind this locator as
//! opaque services; the routing core never needs their concrete types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

type Service = Arc<dyn Any + Send + Sync>;

/// Name → service map with typed retrieval.
#[derive(Default)]
pub struct ServiceLocator {
    services: DashMap<String, Service>,
}

impl ServiceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous one under that name.
    pub fn register<T: Any + Send + Sync>(&self, name: impl Into<String>, service: T) {
        self.register_arc(name, Arc::new(service));
    }

    pub fn register_arc<T: Any + Send + Sync>(&self, name: impl Into<String>, service: Arc<T>) {
        let name = name.into();
        tracing::debug!(service = %name, "Service registered");
        self.services.insert(name, service);
    }

    /// Typed lookup; `None` when absent or registered under another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let service = self.services.get(name)?.value().clone();
        service.downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Registered service names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl fmt::Debug for ServiceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLocator")
            .field("services", &self.names())
            .finish()
    }
}
