//! URL generation from controller references.
//!
//! The structural inverse of [`Router`](crate::routing::Router): find the
//! template routed to a controller and substitute variables back into it.
//!
//! Missing positional variables leave the `(:var)` token in place; surplus
//! variables are ignored. "No template for this controller" is `None`.

use std::sync::Arc;

use url::form_urlencoded;

use crate::routing::map::MapManager;
use crate::routing::matcher::PLACEHOLDER;

/// How [`UrlBuilder::create_query_url`] renders the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryEncoding {
    /// `application/x-www-form-urlencoded`.
    #[default]
    Encoded,
    /// Keys and values written verbatim.
    Raw,
}

/// Builds concrete URLs out of the route map.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    map: Arc<MapManager>,
}

impl UrlBuilder {
    pub fn new(map: Arc<MapManager>) -> Self {
        Self { map }
    }

    /// URL of the first template routed to `controller`.
    pub fn build<S: AsRef<str>>(&self, controller: &str, vars: &[S]) -> Option<String> {
        let template = self.map.get_url_template_by_controller(controller)?;
        Some(substitute(template, vars))
    }

    /// URL of the `index`-th template routed to `controller`.
    pub fn create_url<S: AsRef<str>>(
        &self,
        controller: &str,
        args: &[S],
        index: usize,
    ) -> Option<String> {
        let templates = self.map.find_uri_templates_by_controller(controller);
        let template = templates.get(index)?;
        Some(substitute(template, args))
    }

    /// Template URL followed by a query string built from `params`.
    pub fn create_query_url<K, V>(
        &self,
        controller: &str,
        params: &[(K, V)],
        index: usize,
        encoding: QueryEncoding,
    ) -> Option<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let base = self.create_url::<&str>(controller, &[], index)?;
        if params.is_empty() {
            return Some(base);
        }

        let query = match encoding {
            QueryEncoding::Encoded => form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
                .finish(),
            QueryEncoding::Raw => params
                .iter()
                .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
                .collect::<Vec<_>>()
                .join("&"),
        };

        Some(format!("{}?{}", base, query))
    }
}

/// Replace placeholders positionally; a shortfall keeps the token itself.
fn substitute<S: AsRef<str>>(template: &str, vars: &[S]) -> String {
    let mut pieces = template.split(PLACEHOLDER);
    let mut url = pieces.next().unwrap_or_default().to_string();

    for (i, piece) in pieces.enumerate() {
        match vars.get(i) {
            Some(var) => url.push_str(var.as_ref()),
            None => url.push_str(PLACEHOLDER),
        }
        url.push_str(piece);
    }

    url
}
