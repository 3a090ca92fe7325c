//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Discover, construct and check modules
//! - Assemble the route map, controller actions and dispatcher
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order, never concurrently
//! - [`Bootstrap`] is cheap to clone so a config reload can rebuild the whole
//!   [`Application`] from scratch

use std::sync::Arc;

use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{AppConfig, ConfigError};
use crate::dispatch::{
    ActionContext, ActionHandler, ActionRegistry, DefaultRoute, Dispatcher, ModuleActions,
};
use crate::module::loader::loader_from_config;
use crate::module::{
    AppPaths, ModuleError, ModuleFactories, ModuleManager, PathProvider, ServiceLocator,
};
use crate::routing::{MapManager, RoutingError, UrlBuilder};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("module error: {0}")]
    Module(#[from] ModuleError),

    #[error("no default route configured")]
    MissingDefaultRoute,

    #[error("invalid default route '{0}', expected Module:Controller@action")]
    InvalidDefaultRoute(String),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),
}

/// Everything needed to build an [`Application`].
#[derive(Clone)]
pub struct Bootstrap {
    config: Arc<AppConfig>,
    factories: Arc<ModuleFactories>,
    services: Arc<ServiceLocator>,
    fallback: Option<ActionHandler>,
}

impl Bootstrap {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            factories: Arc::new(ModuleFactories::new()),
            services: Arc::new(ServiceLocator::new()),
            fallback: None,
        }
    }

    pub fn with_factories(mut self, factories: ModuleFactories) -> Self {
        self.factories = Arc::new(factories);
        self
    }

    /// Share a service locator that was populated before startup.
    pub fn with_services(mut self, services: Arc<ServiceLocator>) -> Self {
        self.services = services;
        self
    }

    /// Invokable used as the default route when the config names none.
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&ActionContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Same factories, services and fallback over a new configuration.
    pub fn with_config(&self, config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            ..self.clone()
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the startup pipeline.
    pub fn build(&self) -> Result<Application, StartupError> {
        let config = self.config.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
        tracing::info!(
            discovery = ?config.modules.discovery,
            language = %config.application.language,
            "Bootstrapping application"
        );

        let paths: Arc<dyn PathProvider> = Arc::new(AppPaths::from_config(&config.paths));
        let loader = loader_from_config(&config.modules, paths.as_ref());

        let mut modules = ModuleManager::new(
            loader,
            self.factories.clone(),
            self.services.clone(),
            config.clone(),
            paths,
        );
        modules.set_core_module_names(config.application.core_modules.iter().cloned());
        modules.initialize()?;
        modules.validate_core_module_names()?;
        modules.load_all_translations(&config.application.language);

        let mut routes = modules.routes().clone();
        routes.extend(
            config
                .routes
                .iter()
                .map(|r| (r.template.clone(), r.options.clone())),
        );
        let map = Arc::new(MapManager::new(routes));

        let mut actions = ActionRegistry::new();
        for (name, module) in modules.loaded_modules() {
            module.register_actions(&mut ModuleActions::new(name, &mut actions));
        }
        tracing::info!(
            routes = map.table().len(),
            actions = actions.len(),
            "Components registered"
        );

        let default_route = self.default_route(&actions)?;
        let dispatcher = Dispatcher::new(map.clone(), Arc::new(actions), default_route)?
            .with_redirects(config.redirects.clone())
            .with_services(self.services.clone())
            .with_translations(Arc::new(modules.get_translations().clone()));

        Ok(Application {
            config,
            modules,
            map,
            dispatcher,
        })
    }

    fn default_route(&self, actions: &ActionRegistry) -> Result<DefaultRoute, StartupError> {
        match (&self.config.application.default_route, &self.fallback) {
            (Some(compact), _) => {
                let route = DefaultRoute::parse(compact)
                    .ok_or_else(|| StartupError::InvalidDefaultRoute(compact.clone()))?;
                if !actions.contains(compact) {
                    tracing::warn!(
                        default_route = %compact,
                        "Default route has no registered action, misses will render empty"
                    );
                }
                Ok(route)
            }
            (None, Some(handler)) => Ok(DefaultRoute::Handler(handler.clone())),
            (None, None) => Err(StartupError::MissingDefaultRoute),
        }
    }
}

/// A fully bootstrapped application.
pub struct Application {
    config: Arc<AppConfig>,
    modules: ModuleManager,
    map: Arc<MapManager>,
    dispatcher: Dispatcher,
}

impl Application {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn modules(&self) -> &ModuleManager {
        &self.modules
    }

    pub fn map(&self) -> &MapManager {
        &self.map
    }

    pub fn urls(&self) -> &UrlBuilder {
        self.dispatcher.urls()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
