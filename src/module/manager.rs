//! Module Manager - discovers, constructs and tracks the application's modules.
//!
//! # State Transitions
//! ```text
//! Uninitialized → Initializing (loader.modules() → load each) → Initialized
//! ```
//! `Initialized` is terminal. An empty discovery result aborts startup.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::config::AppConfig;
use crate::module::context::ModuleContext;
use crate::module::core_bag::CoreBag;
use crate::module::error::ModuleError;
use crate::module::loader::Loader;
use crate::module::paths::PathProvider;
use crate::module::registry::ModuleFactories;
use crate::module::services::ServiceLocator;
use crate::module::{is_valid_module_name, Module, TranslationTable};
use crate::observability::metrics;
use crate::routing::RouteTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Uninitialized,
    Initializing,
    Initialized,
}

/// Owns every loaded module plus the routes and translations they contribute.
pub struct ModuleManager {
    state: ManagerState,
    loader: Box<dyn Loader>,
    factories: Arc<ModuleFactories>,
    services: Arc<ServiceLocator>,
    config: Arc<AppConfig>,
    paths: Arc<dyn PathProvider>,
    loaded: IndexMap<String, Arc<dyn Module>>,
    routes: RouteTable,
    translations: TranslationTable,
    core_module_names: Vec<String>,
    core_bag: OnceLock<CoreBag>,
}

impl fmt::Debug for ModuleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleManager")
            .field("state", &self.state)
            .field("loaded", &self.loaded_module_names())
            .field("routes", &self.routes.len())
            .field("core_modules", &self.core_module_names)
            .finish()
    }
}

impl ModuleManager {
    pub fn new(
        loader: Box<dyn Loader>,
        factories: Arc<ModuleFactories>,
        services: Arc<ServiceLocator>,
        config: Arc<AppConfig>,
        paths: Arc<dyn PathProvider>,
    ) -> Self {
        Self {
            state: ManagerState::Uninitialized,
            loader,
            factories,
            services,
            config,
            paths,
            loaded: IndexMap::new(),
            routes: RouteTable::new(),
            translations: TranslationTable::new(),
            core_module_names: Vec::new(),
            core_bag: OnceLock::new(),
        }
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Discover and load every module.
    pub fn initialize(&mut self) -> Result<(), ModuleError> {
        if self.state != ManagerState::Uninitialized {
            return Err(ModuleError::AlreadyInitialized);
        }
        self.state = ManagerState::Initializing;

        let names = self.loader.modules()?;
        if names.is_empty() {
            return Err(ModuleError::NoModules);
        }

        for name in &names {
            if !self.load_module_by_name(name)? {
                tracing::warn!(module = %name, "Discovered module has no registered factory, skipping");
            }
        }

        self.state = ManagerState::Initialized;
        metrics::record_modules_loaded(self.loaded.len());
        tracing::info!(
            modules = ?self.loaded_module_names(),
            routes = self.routes.len(),
            "Modules initialized"
        );
        Ok(())
    }

    /// Load one module by name.
    ///
    /// `Ok(false)` when no factory exists for the name: the module is an
    /// optional reference that is simply absent.
    pub fn load_module_by_name(&mut self, name: &str) -> Result<bool, ModuleError> {
        if !is_valid_module_name(name) {
            return Err(ModuleError::InvalidName(name.to_string()));
        }
        if self.loaded.contains_key(name) {
            return Ok(true);
        }

        let Some(factory) = self.factories.get(name).cloned() else {
            tracing::debug!(module = %name, "No factory for module");
            return Ok(false);
        };

        let ctx = ModuleContext::new(
            name,
            self.services.clone(),
            self.config.clone(),
            self.paths.clone(),
        );
        let module = factory(&ctx);

        if let Some(routes) = module.routes() {
            let count = routes.len();
            self.routes.extend(routes.into_iter().map(|(template, mut options)| {
                options.controller = options
                    .controller
                    .map(|controller| format!("{}:{}", name, controller));
                (template, options)
            }));
            tracing::debug!(module = %name, routes = count, "Module routes registered");
        }

        self.loaded.insert(name.to_string(), module);
        self.core_bag = OnceLock::new();
        tracing::info!(module = %name, "Module loaded");
        Ok(true)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    pub fn get_module(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.loaded.get(name).cloned()
    }

    /// Names from `names` that are not loaded.
    pub fn get_unloaded_modules<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.is_loaded(name))
            .map(str::to_string)
            .collect()
    }

    /// Loaded module names in load order.
    pub fn loaded_module_names(&self) -> Vec<&str> {
        self.loaded.keys().map(String::as_str).collect()
    }

    pub fn loaded_modules(&self) -> impl Iterator<Item = (&str, &Arc<dyn Module>)> {
        self.loaded.iter().map(|(name, module)| (name.as_str(), module))
    }

    /// Routes aggregated from every loaded module, in load order.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Merge every loaded module's translations for `language`.
    pub fn load_all_translations(&mut self, language: &str) {
        for (name, module) in &self.loaded {
            if let Some(translations) = module.translations(language) {
                self.translations
                    .entry(name.clone())
                    .or_default()
                    .extend(translations);
            }
        }
        tracing::debug!(
            language = %language,
            modules = self.translations.len(),
            "Translations loaded"
        );
    }

    pub fn get_translations(&self) -> &TranslationTable {
        &self.translations
    }

    pub fn set_core_module_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core_module_names = names.into_iter().map(Into::into).collect();
        self.core_bag = OnceLock::new();
    }

    /// Required vs. loaded modules, computed once per loaded set.
    pub fn core_bag(&self) -> &CoreBag {
        self.core_bag.get_or_init(|| {
            CoreBag::new(self.loaded.keys().cloned(), self.core_module_names.iter().cloned())
        })
    }

    /// Fail when any core module is not loaded, naming every missing one.
    pub fn validate_core_module_names(&self) -> Result<(), ModuleError> {
        let missing = self.core_bag().missing_core_modules();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ModuleError::MissingCoreModules(
            missing.into_iter().map(str::to_string).collect(),
        ))
    }

    pub fn remove_from_cache_dir(&self, name: &str) -> Result<(), ModuleError> {
        self.remove_dir(name, self.paths.module_cache_dir(name))
    }

    pub fn remove_from_uploads_dir(&self, name: &str) -> Result<(), ModuleError> {
        self.remove_dir(name, self.paths.module_uploads_dir(name))
    }

    /// Remove a module's sources, cache and uploads. Core modules are refused.
    pub fn remove_from_file_system(&self, name: &str) -> Result<(), ModuleError> {
        if self.core_bag().is_core_module(name) {
            return Err(ModuleError::CoreModuleRemoval(name.to_string()));
        }

        self.remove_from_cache_dir(name)?;
        self.remove_from_uploads_dir(name)?;
        self.remove_dir(name, self.paths.module_dir(name))
    }

    fn remove_dir(&self, name: &str, path: std::path::PathBuf) -> Result<(), ModuleError> {
        if !is_valid_module_name(name) {
            return Err(ModuleError::InvalidName(name.to_string()));
        }

        match std::fs::remove_dir_all(&path) {
            Ok(()) => {
                tracing::info!(module = %name, path = ?path, "Module directory removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ModuleError::Filesystem {
                module: name.to_string(),
                path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use crate::module::loader::StaticLoader;
    use crate::module::paths::AppPaths;
    use crate::module::Translations;
    use crate::routing::{MapManager, RouteOptions};

    struct BlogModule;

    impl Module for BlogModule {
        fn routes(&self) -> Option<RouteTable> {
            Some(RouteTable::new().with_route("/post/(:var)", RouteOptions::controller("Post@view")))
        }

        fn translations(&self, language: &str) -> Option<Translations> {
            (language == "en").then(|| Translations::from([("title".into(), "Blog".into())]))
        }
    }

    struct ShopModule;

    impl Module for ShopModule {
        fn translations(&self, language: &str) -> Option<Translations> {
            (language == "en").then(|| Translations::from([("title".into(), "Shop".into())]))
        }
    }

    fn factories() -> Arc<ModuleFactories> {
        Arc::new(
            ModuleFactories::new()
                .with("Blog", |_| Arc::new(BlogModule))
                .with("Shop", |_| Arc::new(ShopModule)),
        )
    }

    fn manager_with(loader: StaticLoader, paths: AppPaths) -> ModuleManager {
        ModuleManager::new(
            Box::new(loader),
            factories(),
            Arc::new(ServiceLocator::new()),
            Arc::new(AppConfig::default()),
            Arc::new(paths),
        )
    }

    fn manager(names: &[&str]) -> ModuleManager {
        manager_with(
            StaticLoader::new(names.iter().copied()),
            AppPaths::from_config(&PathsConfig::default()),
        )
    }

    #[test]
    fn test_initialize_loads_and_prefixes_routes() {
        let mut mm = manager(&["Blog", "Shop"]);
        assert_eq!(mm.state(), ManagerState::Uninitialized);

        mm.initialize().unwrap();
        assert_eq!(mm.state(), ManagerState::Initialized);
        assert_eq!(mm.loaded_module_names(), vec!["Blog", "Shop"]);

        let map = MapManager::new(mm.routes().clone());
        assert_eq!(map.get_action_by_uri_template("/post/(:var)"), Ok(Some("view")));
        assert_eq!(map.get_controllers(), vec!["Blog:Post@view"]);

        assert!(matches!(mm.initialize(), Err(ModuleError::AlreadyInitialized)));
    }

    #[test]
    fn test_empty_discovery_is_fatal() {
        let mut mm = manager(&[]);
        assert!(matches!(mm.initialize(), Err(ModuleError::NoModules)));
    }

    #[test]
    fn test_module_name_validation() {
        let mut mm = manager(&[]);
        assert!(matches!(
            mm.load_module_by_name("users"),
            Err(ModuleError::InvalidName(_))
        ));
        // Valid name without a factory is an absent optional module.
        assert!(!mm.load_module_by_name("Users").unwrap());
        assert!(mm.load_module_by_name("Blog").unwrap());
        assert!(mm.is_loaded("Blog"));
        assert!(mm.get_module("Blog").is_some());
        assert!(mm.get_module("Users").is_none());
    }

    #[test]
    fn test_unknown_listed_module_is_skipped() {
        let mut mm = manager(&["Blog", "Forum"]);
        mm.initialize().unwrap();
        assert_eq!(mm.loaded_module_names(), vec!["Blog"]);
        assert_eq!(mm.get_unloaded_modules(&["Blog", "Forum", "Shop"]), vec!["Forum", "Shop"]);
    }

    #[test]
    fn test_translations_are_namespaced() {
        let mut mm = manager(&["Blog", "Shop"]);
        mm.initialize().unwrap();
        mm.load_all_translations("en");

        let translations = mm.get_translations();
        assert_eq!(translations["Blog"]["title"], "Blog");
        assert_eq!(translations["Shop"]["title"], "Shop");

        let mut mm = manager(&["Blog"]);
        mm.initialize().unwrap();
        mm.load_all_translations("de");
        assert!(mm.get_translations().is_empty());
    }

    #[test]
    fn test_core_module_validation() {
        let mut mm = manager(&["Blog"]);
        mm.set_core_module_names(["Blog", "Shop", "Admin"]);
        mm.initialize().unwrap();

        match mm.validate_core_module_names() {
            Err(ModuleError::MissingCoreModules(missing)) => {
                assert_eq!(missing, vec!["Shop", "Admin"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        mm.set_core_module_names(["Blog"]);
        assert!(mm.validate_core_module_names().is_ok());
        assert!(mm.core_bag().is_core_module("Blog"));
    }

    #[test]
    fn test_remove_from_file_system() {
        let root = tempfile::tempdir().unwrap();
        let paths = AppPaths::from_config(&PathsConfig {
            root: root.path().to_string_lossy().into_owned(),
            ..PathsConfig::default()
        });
        for dir in [
            paths.module_dir("Shop"),
            paths.module_cache_dir("Shop"),
            paths.module_uploads_dir("Shop"),
            paths.module_dir("Blog"),
        ] {
            std::fs::create_dir_all(dir).unwrap();
        }

        let mut mm = manager_with(StaticLoader::new(["Blog", "Shop"]), paths.clone());
        mm.set_core_module_names(["Blog"]);
        mm.initialize().unwrap();

        assert!(matches!(
            mm.remove_from_file_system("Blog"),
            Err(ModuleError::CoreModuleRemoval(_))
        ));
        assert!(paths.module_dir("Blog").exists());

        mm.remove_from_file_system("Shop").unwrap();
        assert!(!paths.module_dir("Shop").exists());
        assert!(!paths.module_cache_dir("Shop").exists());
        assert!(!paths.module_uploads_dir("Shop").exists());

        // Nothing left to remove is not an error.
        mm.remove_from_cache_dir("Shop").unwrap();
        assert!(matches!(
            mm.remove_from_uploads_dir("../Blog"),
            Err(ModuleError::InvalidName(_))
        ));
    }
}
