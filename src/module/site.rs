//! Built-in `Site` module: the home page and the not-found page.

use std::sync::Arc;

use crate::dispatch::{ActionContext, ModuleActions};
use crate::module::registry::ModuleFactories;
use crate::module::{Module, Translations};
use crate::routing::{RouteOptions, RouteTable};

pub const SITE_MODULE: &str = "Site";

/// Compact reference of the built-in not-found action.
pub const NOT_FOUND_ROUTE: &str = "Site:Main@notFound";

#[derive(Debug, Default)]
pub struct SiteModule;

impl Module for SiteModule {
    fn routes(&self) -> Option<RouteTable> {
        Some(RouteTable::new().with_route("/", RouteOptions::controller("Main@home")))
    }

    fn translations(&self, language: &str) -> Option<Translations> {
        let pairs: &[(&str, &str)] = match language {
            "en" => &[("welcome", "Welcome"), ("not_found", "Page not found")],
            "de" => &[("welcome", "Willkommen"), ("not_found", "Seite nicht gefunden")],
            _ => return None,
        };
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn register_actions(&self, actions: &mut ModuleActions<'_>) {
        actions
            .add("Main@home", |ctx| Some(text(ctx, "welcome")))
            .add("Main@notFound", |ctx| Some(text(ctx, "not_found")));
    }
}

fn text(ctx: &ActionContext<'_>, key: &str) -> String {
    ctx.translate(SITE_MODULE, key).unwrap_or(key).to_string()
}

/// Factories for every module that ships with the server binary.
pub fn builtin_factories() -> ModuleFactories {
    ModuleFactories::new().with(SITE_MODULE, |_| Arc::new(SiteModule))
}
