//! Route table and structural queries over it.
//!
//! # Responsibilities
//! - Hold URI template → options in registration order
//! - Answer controller ↔ template lookups for the router and URL builder
//!
//! # Design Decisions
//! - Insertion order is routing priority, so the table is an `IndexMap`
//! - Re-registering a template replaces its options and keeps its slot
//! - Controller comparison is plain string equality, not semantic

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::error::MapError;

/// Options attached to a single URI template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteOptions {
    /// Controller reference in compact notation (`Module:Controller@action`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// HTTP method restriction (case-insensitive), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Framework-specific flags carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RouteOptions {
    pub fn controller(controller: impl Into<String>) -> Self {
        Self {
            controller: Some(controller.into()),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up a single option by name, including the typed ones.
    pub fn option(&self, key: &str) -> Option<Value> {
        match key {
            "controller" => self.controller.clone().map(Value::String),
            "method" => self.method.clone().map(Value::String),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Whether this route accepts the given request method.
    pub fn allows_method(&self, method: &str) -> bool {
        self.method
            .as_deref()
            .map(|m| m.eq_ignore_ascii_case(method))
            .unwrap_or(true)
    }
}

/// Ordered URI template → options table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: IndexMap<String, RouteOptions>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. The last registration of a template wins.
    pub fn insert(&mut self, template: impl Into<String>, options: RouteOptions) {
        self.entries.insert(template.into(), options);
    }

    pub fn with_route(mut self, template: impl Into<String>, options: RouteOptions) -> Self {
        self.insert(template, options);
        self
    }

    pub fn get(&self, template: &str) -> Option<&RouteOptions> {
        self.entries.get(template)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteOptions)> {
        self.entries.iter().map(|(t, o)| (t.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<(String, RouteOptions)> for RouteTable {
    fn extend<T: IntoIterator<Item = (String, RouteOptions)>>(&mut self, iter: T) {
        for (template, options) in iter {
            self.insert(template, options);
        }
    }
}

impl FromIterator<(String, RouteOptions)> for RouteTable {
    fn from_iter<T: IntoIterator<Item = (String, RouteOptions)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl IntoIterator for RouteTable {
    type Item = (String, RouteOptions);
    type IntoIter = indexmap::map::IntoIter<String, RouteOptions>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Read-only queries over a finished [`RouteTable`].
#[derive(Debug, Clone, Default)]
pub struct MapManager {
    table: RouteTable,
}

impl MapManager {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Full options record of a template.
    pub fn get_data_by_uri_template(&self, template: &str) -> Result<&RouteOptions, MapError> {
        self.table
            .get(template)
            .ok_or_else(|| MapError::UnknownTemplate(template.to_string()))
    }

    /// A single named option of a template.
    pub fn get_option(&self, template: &str, option: &str) -> Result<Value, MapError> {
        self.get_data_by_uri_template(template)?
            .option(option)
            .ok_or_else(|| MapError::UnknownOption {
                template: template.to_string(),
                option: option.to_string(),
            })
    }

    /// Every controller reference in table order; entries without one are skipped.
    pub fn get_controllers(&self) -> Vec<&str> {
        self.table
            .iter()
            .filter_map(|(_, options)| options.controller.as_deref())
            .collect()
    }

    /// All templates routed to exactly this controller reference.
    pub fn find_uri_templates_by_controller(&self, controller: &str) -> Vec<&str> {
        self.table
            .iter()
            .filter(|(_, options)| options.controller.as_deref() == Some(controller))
            .map(|(template, _)| template)
            .collect()
    }

    /// First template routed to this controller reference.
    pub fn get_url_template_by_controller(&self, controller: &str) -> Option<&str> {
        self.table
            .iter()
            .find(|(_, options)| options.controller.as_deref() == Some(controller))
            .map(|(template, _)| template)
    }

    /// Registered templates in priority order.
    pub fn get_uri_map(&self) -> Vec<&str> {
        self.table.iter().map(|(template, _)| template).collect()
    }

    /// Controller part (before `@`) of a template's controller reference.
    ///
    /// `Ok(None)` when the reference carries no action separator.
    pub fn get_controller_by_uri_template(&self, template: &str) -> Result<Option<&str>, MapError> {
        Ok(self.split_controller(template)?.map(|(controller, _)| controller))
    }

    /// Action part (after `@`) of a template's controller reference.
    ///
    /// `Ok(None)` when the reference carries no action separator.
    pub fn get_action_by_uri_template(&self, template: &str) -> Result<Option<&str>, MapError> {
        Ok(self.split_controller(template)?.map(|(_, action)| action))
    }

    fn split_controller(&self, template: &str) -> Result<Option<(&str, &str)>, MapError> {
        let controller = self
            .get_data_by_uri_template(template)?
            .controller
            .as_deref()
            .ok_or_else(|| MapError::UnknownOption {
                template: template.to_string(),
                option: "controller".to_string(),
            })?;

        Ok(controller.split_once('@'))
    }
}
