//! Route lookup.
//!
//! # Responsibilities
//! - Hold compiled templates in table order
//! - Match an inbound path and extract its variables
//! - Return the match or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared across requests without locks)
//! - O(n) scan in registration order; first match wins, never best match
//! - No-match is `None`, the caller decides on fallback handling

use crate::routing::error::RoutingError;
use crate::routing::map::MapManager;
use crate::routing::matcher::CompiledTemplate;
use crate::routing::route_match::RouteMatch;

/// First-match-wins router over an ordered list of URI templates.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<CompiledTemplate>,
}

impl Router {
    /// Compile every template up front, preserving order.
    pub fn new<I, S>(templates: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let routes = templates
            .into_iter()
            .map(|t| CompiledTemplate::compile(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { routes })
    }

    /// Router over every template of a route map.
    pub fn from_map(map: &MapManager) -> Result<Self, RoutingError> {
        Self::new(map.get_uri_map())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a request path. The first template that matches wins.
    pub fn match_path(&self, path: &str, method: Option<&str>) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            let caps = route.captures(path)?;
            tracing::trace!(template = %route.template(), path = %path, "Route matched");

            Some(
                RouteMatch::new(
                    caps.matched,
                    route.template(),
                    method.map(str::to_string),
                    caps.variables,
                )
                .with_query(caps.query),
            )
        })
    }
}

/// One-shot match against a template list, compiling on the fly.
///
/// Templates that fail to compile are skipped.
pub fn match_uri<S: AsRef<str>>(path: &str, templates: &[S]) -> Option<RouteMatch> {
    templates.iter().find_map(|template| {
        let route = match CompiledTemplate::compile(template.as_ref()) {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping uncompilable template");
                return None;
            }
        };
        let caps = route.captures(path)?;
        Some(RouteMatch::new(caps.matched, route.template(), None, caps.variables).with_query(caps.query))
    })
}
