//! URI template compilation.
//!
//! # Responsibilities
//! - Turn a URI template into an anchored, case-insensitive regex
//! - Capture each `(:var)` placeholder and an optional trailing query string
//!
//! # Design Decisions
//! - `(:var)` is the only placeholder; everything else is escaped literal text,
//!   so malformed placeholders simply fail to match
//! - A placeholder captures a run of non-`/` characters
//! - Compiled once per template for the lifetime of a route table

use regex::Regex;

use crate::routing::error::RoutingError;

/// The single recognised placeholder token.
pub const PLACEHOLDER: &str = "(:var)";

const PLACEHOLDER_PATTERN: &str = "([^/]+)";
const QUERY_PATTERN: &str = r"(?:\?(.*))?";

/// A URI template together with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: String,
    regex: Regex,
    placeholders: usize,
}

/// Raw captures of a successful template match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCaptures {
    /// Whole matched input.
    pub matched: String,
    /// One value per placeholder, in order.
    pub variables: Vec<String>,
    /// Query string after `?`, when the input carried one.
    pub query: Option<String>,
}

impl CompiledTemplate {
    pub fn compile(template: &str) -> Result<Self, RoutingError> {
        let regex = Regex::new(&template_pattern(template)).map_err(|source| {
            RoutingError::Pattern {
                template: template.to_string(),
                source,
            }
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            placeholders: placeholder_count(template),
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Match the full input against this template.
    pub fn captures(&self, input: &str) -> Option<TemplateCaptures> {
        let caps = self.regex.captures(input)?;

        let matched = caps.get(0)?.as_str().to_string();
        let variables = (1..=self.placeholders)
            .filter_map(|i| caps.get(i))
            .map(|m| m.as_str().to_string())
            .collect();
        let query = caps
            .get(self.placeholders + 1)
            .map(|m| m.as_str().to_string());

        Some(TemplateCaptures {
            matched,
            variables,
            query,
        })
    }
}

/// Number of `(:var)` tokens in a template.
pub fn placeholder_count(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

fn template_pattern(template: &str) -> String {
    let body = template
        .split(PLACEHOLDER)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(PLACEHOLDER_PATTERN);

    format!("(?i)^{}{}$", body, QUERY_PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_shape() {
        assert_eq!(
            template_pattern("/post/(:var)"),
            r"(?i)^/post/([^/]+)(?:\?(.*))?$"
        );
        // Regex metacharacters in literals are escaped.
        assert_eq!(template_pattern("/a.b"), r"(?i)^/a\.b(?:\?(.*))?$");
    }

    #[test]
    fn test_captures_variables() {
        let t = CompiledTemplate::compile("/user/(:var)/(:var)").unwrap();
        assert_eq!(t.placeholders(), 2);

        let caps = t.captures("/user/42/bio").unwrap();
        assert_eq!(caps.matched, "/user/42/bio");
        assert_eq!(caps.variables, vec!["42", "bio"]);
        assert_eq!(caps.query, None);

        assert!(t.captures("/user/42").is_none());
        assert!(t.captures("/user/42/bio/extra").is_none());
    }

    #[test]
    fn test_case_insensitive_and_query() {
        let t = CompiledTemplate::compile("/About").unwrap();
        let caps = t.captures("/about?ref=home").unwrap();
        assert_eq!(caps.query.as_deref(), Some("ref=home"));
        assert!(caps.variables.is_empty());
    }

    #[test]
    fn test_malformed_placeholder_is_literal() {
        let t = CompiledTemplate::compile("/post/(:id)").unwrap();
        assert_eq!(t.placeholders(), 0);
        assert!(t.captures("/post/42").is_none());
        assert!(t.captures("/post/(:id)").is_some());
    }
}
