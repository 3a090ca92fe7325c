//! Collaborators handed to a module when it is constructed.

use std::fmt;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::module::paths::PathProvider;
use crate::module::services::ServiceLocator;

#[derive(Clone)]
pub struct ModuleContext {
    name: String,
    services: Arc<ServiceLocator>,
    config: Arc<AppConfig>,
    paths: Arc<dyn PathProvider>,
}

impl ModuleContext {
    pub fn new(
        name: impl Into<String>,
        services: Arc<ServiceLocator>,
        config: Arc<AppConfig>,
        paths: Arc<dyn PathProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            services,
            config,
            paths,
        }
    }

    /// Name the module was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn services(&self) -> &Arc<ServiceLocator> {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn paths(&self) -> &dyn PathProvider {
        self.paths.as_ref()
    }
}

impl fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleContext")
            .field("name", &self.name)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}
