//! Controller resolution.
//!
//! # Responsibilities
//! - Map a structural controller path + action to application code
//! - Hand that code the route variables and shared services
//!
//! # Design Decisions
//! - Actions are plain closures registered per module at bootstrap
//! - `None` from an action means "not found" and triggers the fallback

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::module::{ServiceLocator, TranslationTable};
use crate::routing::{RouteMatch, RouteNotation, UrlBuilder};

/// Application code behind a controller action.
pub type ActionHandler = Arc<dyn Fn(&ActionContext<'_>) -> Option<String> + Send + Sync>;

/// What an action sees while rendering.
pub struct ActionContext<'a> {
    route: Option<&'a RouteMatch>,
    services: &'a ServiceLocator,
    translations: &'a TranslationTable,
    urls: &'a UrlBuilder,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        route: Option<&'a RouteMatch>,
        services: &'a ServiceLocator,
        translations: &'a TranslationTable,
        urls: &'a UrlBuilder,
    ) -> Self {
        Self {
            route,
            services,
            translations,
            urls,
        }
    }

    /// The matched route; `None` while rendering the fallback.
    pub fn route(&self) -> Option<&RouteMatch> {
        self.route
    }

    pub fn variables(&self) -> &[String] {
        self.route.map(RouteMatch::variables).unwrap_or_default()
    }

    pub fn variable(&self, index: usize) -> Option<&str> {
        self.route.and_then(|r| r.variable(index))
    }

    pub fn services(&self) -> &ServiceLocator {
        self.services
    }

    pub fn urls(&self) -> &UrlBuilder {
        self.urls
    }

    /// Translated text of `key` within `module`'s namespace.
    pub fn translate(&self, module: &str, key: &str) -> Option<&str> {
        self.translations
            .get(module)
            .and_then(|t| t.get(key))
            .map(String::as_str)
    }
}

/// Invokes application logic for a resolved controller.
pub trait ControllerResolver: Send + Sync {
    /// Rendered output, or `None` when the controller/action does not exist
    /// or declines to render.
    fn call(&self, class_path: &str, action: &str, ctx: &ActionContext<'_>) -> Option<String>;
}

/// Controller path + action → handler table.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<(String, String), ActionHandler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a compact reference (`Module:Controller@action`).
    pub fn register<F>(&mut self, compact: &str, handler: F)
    where
        F: Fn(&ActionContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        let (class_path, action) = RouteNotation::to_args(compact);
        self.actions.insert((class_path, action), Arc::new(handler));
    }

    pub fn contains(&self, compact: &str) -> bool {
        self.actions.contains_key(&RouteNotation::to_args(compact))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ControllerResolver for ActionRegistry {
    fn call(&self, class_path: &str, action: &str, ctx: &ActionContext<'_>) -> Option<String> {
        let key = (class_path.to_string(), action.to_string());
        let Some(handler) = self.actions.get(&key) else {
            tracing::debug!(controller = %class_path, action = %action, "No such action");
            return None;
        };
        handler(ctx)
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .actions
            .keys()
            .map(|(path, action)| format!("{}@{}", path, action))
            .collect();
        keys.sort();
        f.debug_struct("ActionRegistry").field("actions", &keys).finish()
    }
}

/// Registration view scoped to one module: references are `Controller@action`.
pub struct ModuleActions<'a> {
    module: &'a str,
    registry: &'a mut ActionRegistry,
}

impl<'a> ModuleActions<'a> {
    pub fn new(module: &'a str, registry: &'a mut ActionRegistry) -> Self {
        Self { module, registry }
    }

    pub fn module(&self) -> &str {
        self.module
    }

    pub fn add<F>(&mut self, reference: &str, handler: F) -> &mut Self
    where
        F: Fn(&ActionContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.registry
            .register(&format!("{}:{}", self.module, reference), handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MapManager;

    #[test]
    fn test_registry_resolves_by_class_path() {
        let mut registry = ActionRegistry::new();
        ModuleActions::new("Blog", &mut registry)
            .add("Post@view", |ctx| ctx.variable(0).map(|id| format!("post {id}")))
            .add("Post@list", |_| Some("all posts".into()));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Blog:Post@view"));

        let services = ServiceLocator::new();
        let translations = TranslationTable::new();
        let urls = UrlBuilder::new(Arc::new(MapManager::default()));
        let route = RouteMatch::new("/post/7", "/post/(:var)", None, vec!["7".into()]);
        let ctx = ActionContext::new(Some(&route), &services, &translations, &urls);

        assert_eq!(
            registry.call("/Blog/Controller/Post", "view", &ctx).as_deref(),
            Some("post 7")
        );
        assert_eq!(registry.call("/Blog/Controller/Post", "edit", &ctx), None);

        let fallback_ctx = ActionContext::new(None, &services, &translations, &urls);
        assert!(fallback_ctx.variables().is_empty());
        assert_eq!(registry.call("/Blog/Controller/Post", "view", &fallback_ctx), None);
    }
}
