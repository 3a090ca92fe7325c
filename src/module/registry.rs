//! Module name → constructor registry.
//!
//! Applications register one factory per module they ship; the manager
//! only constructs modules that discovery lists *and* that have a factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::module::context::ModuleContext;
use crate::module::Module;

/// Builds a module instance from its construction context.
pub type ModuleFactory = Arc<dyn Fn(&ModuleContext) -> Arc<dyn Module> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ModuleFactories {
    factories: HashMap<String, ModuleFactory>,
}

impl ModuleFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. A later registration under the same name replaces it.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ModuleContext) -> Arc<dyn Module> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            tracing::warn!(module = %name, "Module factory registered twice, replacing");
        }
        self.factories.insert(name, Arc::new(factory));
    }

    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ModuleContext) -> Arc<dyn Module> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ModuleFactory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ModuleFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleFactories")
            .field("modules", &self.names())
            .finish()
    }
}
