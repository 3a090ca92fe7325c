//! The route used when nothing else matches.

use std::fmt;
use std::sync::Arc;

use crate::dispatch::controller::{ActionContext, ActionHandler};
use crate::routing::ControllerRef;

/// Either a controller reference or an invokable.
#[derive(Clone)]
pub enum DefaultRoute {
    Controller(ControllerRef),
    Handler(ActionHandler),
}

impl DefaultRoute {
    /// Parse a `Module:Controller@action` reference.
    pub fn parse(compact: &str) -> Option<Self> {
        ControllerRef::parse(compact).map(Self::Controller)
    }

    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&ActionContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(handler))
    }
}

impl fmt::Debug for DefaultRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller(r) => f.debug_tuple("Controller").field(&r.to_string()).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}
