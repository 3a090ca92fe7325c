//! Result of a successful route match.

use serde::Serialize;

/// Built once per matched request and dropped with the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    matched_uri: String,
    matched_uri_template: String,
    method: Option<String>,
    variables: Vec<String>,
    query: Option<String>,
}

impl RouteMatch {
    pub fn new(
        matched_uri: impl Into<String>,
        matched_uri_template: impl Into<String>,
        method: Option<String>,
        variables: Vec<String>,
    ) -> Self {
        Self {
            matched_uri: matched_uri.into(),
            matched_uri_template: matched_uri_template.into(),
            method,
            variables,
            query: None,
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn matched_uri(&self) -> &str {
        &self.matched_uri
    }

    pub fn matched_uri_template(&self) -> &str {
        &self.matched_uri_template
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn variable(&self, index: usize) -> Option<&str> {
        self.variables.get(index).map(String::as_str)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}
