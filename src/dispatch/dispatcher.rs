//! Request dispatch: redirect → match → render → fallback.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatch::controller::{ActionContext, ControllerResolver};
use crate::dispatch::fallback::DefaultRoute;
use crate::module::{ServiceLocator, TranslationTable};
use crate::observability::metrics;
use crate::routing::redirect::process_redirect;
use crate::routing::{MapManager, RouteMatch, RouteNotation, Router, RoutingError, UrlBuilder};

/// What the dispatcher decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A route matched and its controller rendered.
    Matched { template: String, body: String },
    /// Nothing rendered; the default route's output, if any.
    NotFound { body: Option<String> },
    /// Permanent redirect.
    Redirect { location: String },
}

impl DispatchOutcome {
    pub fn status(&self) -> u16 {
        match self {
            Self::Matched { .. } => 200,
            Self::NotFound { .. } => 404,
            Self::Redirect { .. } => 301,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Matched { body, .. } => body,
            Self::NotFound { body } => body.as_deref().unwrap_or_default(),
            Self::Redirect { .. } => "",
        }
    }
}

/// Ties the router, route map and controller resolver together.
pub struct Dispatcher {
    router: Router,
    map: Arc<MapManager>,
    urls: UrlBuilder,
    resolver: Arc<dyn ControllerResolver>,
    default_route: DefaultRoute,
    redirects: HashMap<String, String>,
    services: Arc<ServiceLocator>,
    translations: Arc<TranslationTable>,
}

impl Dispatcher {
    pub fn new(
        map: Arc<MapManager>,
        resolver: Arc<dyn ControllerResolver>,
        default_route: DefaultRoute,
    ) -> Result<Self, RoutingError> {
        Ok(Self {
            router: Router::from_map(&map)?,
            urls: UrlBuilder::new(map.clone()),
            map,
            resolver,
            default_route,
            redirects: HashMap::new(),
            services: Arc::new(ServiceLocator::new()),
            translations: Arc::new(TranslationTable::new()),
        })
    }

    pub fn with_redirects(mut self, redirects: HashMap<String, String>) -> Self {
        self.redirects = redirects;
        self
    }

    pub fn with_services(mut self, services: Arc<ServiceLocator>) -> Self {
        self.services = services;
        self
    }

    pub fn with_translations(mut self, translations: Arc<TranslationTable>) -> Self {
        self.translations = translations;
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn default_route(&self) -> &DefaultRoute {
        &self.default_route
    }

    /// Handle one request path.
    pub fn dispatch(&self, method: &str, path: &str) -> DispatchOutcome {
        if let Some(location) = process_redirect(path, &self.redirects) {
            tracing::debug!(path = %path, location = %location, "Permanent redirect");
            metrics::record_redirect();
            return DispatchOutcome::Redirect {
                location: location.to_string(),
            };
        }

        match self.router.match_path(path, Some(method)) {
            Some(route) => {
                if let Some(body) = self.render(method, &route) {
                    return DispatchOutcome::Matched {
                        template: route.matched_uri_template().to_string(),
                        body,
                    };
                }
                tracing::debug!(
                    path = %path,
                    template = %route.matched_uri_template(),
                    "Matched route did not render, falling back"
                );
            }
            None => {
                tracing::debug!(method = %method, path = %path, "No route matched");
            }
        }

        metrics::record_route_miss();
        self.fallback()
    }

    fn render(&self, method: &str, route: &RouteMatch) -> Option<String> {
        let options = match self.map.get_data_by_uri_template(route.matched_uri_template()) {
            Ok(options) => options,
            Err(e) => {
                tracing::error!(error = %e, "Router and route map disagree");
                return None;
            }
        };
        if !options.allows_method(method) {
            tracing::debug!(
                template = %route.matched_uri_template(),
                method = %method,
                "Method not allowed for route"
            );
            return None;
        }

        let controller = options.controller.as_deref()?;
        let (class_path, action) = RouteNotation::to_args(controller);
        let ctx = self.context(Some(route));

        self.resolver.call(&class_path, &action, &ctx)
    }

    fn fallback(&self) -> DispatchOutcome {
        let ctx = self.context(None);
        let body = match &self.default_route {
            DefaultRoute::Controller(r) => self.resolver.call(&r.class_path(), &r.action, &ctx),
            DefaultRoute::Handler(handler) => handler(&ctx),
        };

        if body.is_none() {
            tracing::warn!(default_route = ?self.default_route, "Default route produced no output");
        }
        DispatchOutcome::NotFound { body }
    }

    fn context<'a>(&'a self, route: Option<&'a RouteMatch>) -> ActionContext<'a> {
        ActionContext::new(route, &self.services, &self.translations, &self.urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::controller::ActionRegistry;
    use crate::routing::{RouteOptions, RouteTable};

    fn dispatcher(default_route: DefaultRoute) -> Dispatcher {
        let map = Arc::new(MapManager::new(
            RouteTable::new()
                .with_route("/", RouteOptions::controller("Home:Index@show"))
                .with_route("/post/(:var)", RouteOptions::controller("Blog:Post@view"))
                .with_route("/draft/(:var)", RouteOptions::controller("Blog:Post@draft"))
                .with_route(
                    "/post/(:var)/delete",
                    RouteOptions::controller("Blog:Post@delete").with_method("POST"),
                ),
        ));

        let mut actions = ActionRegistry::new();
        actions.register("Home:Index@show", |_| Some("home".into()));
        actions.register("Blog:Post@view", |ctx| {
            ctx.variable(0).map(|id| format!("post {id}"))
        });
        actions.register("Blog:Post@draft", |_| None);
        actions.register("Blog:Post@delete", |_| Some("deleted".into()));
        actions.register("Home:Error@notFound", |_| Some("not found".into()));

        Dispatcher::new(map, Arc::new(actions), default_route)
            .unwrap()
            .with_redirects(HashMap::from([("/old".to_string(), "/".to_string())]))
    }

    #[test]
    fn test_matched_route_renders() {
        let d = dispatcher(DefaultRoute::parse("Home:Error@notFound").unwrap());
        let outcome = d.dispatch("GET", "/post/42");
        assert_eq!(
            outcome,
            DispatchOutcome::Matched {
                template: "/post/(:var)".into(),
                body: "post 42".into(),
            }
        );
        assert_eq!(outcome.status(), 200);
    }

    #[test]
    fn test_miss_uses_default_route() {
        let d = dispatcher(DefaultRoute::parse("Home:Error@notFound").unwrap());
        let outcome = d.dispatch("GET", "/nowhere");
        assert_eq!(outcome.status(), 404);
        assert_eq!(outcome.body(), "not found");

        // A controller that declines to render also falls back.
        assert_eq!(d.dispatch("GET", "/draft/1").body(), "not found");
    }

    #[test]
    fn test_invokable_default_route() {
        let d = dispatcher(DefaultRoute::handler(|ctx| {
            assert!(ctx.route().is_none());
            Some("custom 404".into())
        }));
        assert_eq!(
            d.dispatch("GET", "/missing"),
            DispatchOutcome::NotFound {
                body: Some("custom 404".into())
            }
        );
    }

    #[test]
    fn test_unresolvable_default_route() {
        let d = dispatcher(DefaultRoute::parse("Nope:Missing@gone").unwrap());
        assert_eq!(d.dispatch("GET", "/missing"), DispatchOutcome::NotFound { body: None });
    }

    #[test]
    fn test_redirect_short_circuits() {
        let d = dispatcher(DefaultRoute::parse("Home:Error@notFound").unwrap());
        let outcome = d.dispatch("GET", "/old");
        assert_eq!(outcome, DispatchOutcome::Redirect { location: "/".into() });
        assert_eq!(outcome.status(), 301);
    }

    #[test]
    fn test_method_restriction() {
        let d = dispatcher(DefaultRoute::parse("Home:Error@notFound").unwrap());
        assert_eq!(d.dispatch("post", "/post/1/delete").body(), "deleted");
        assert_eq!(d.dispatch("GET", "/post/1/delete").status(), 404);
    }
}
