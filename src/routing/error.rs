//! Routing error definitions.

use thiserror::Error;

/// Structural lookup failures against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The URI template is not registered.
    #[error("URI template '{0}' is not registered")]
    UnknownTemplate(String),

    /// The template exists but carries no such option.
    #[error("URI template '{template}' has no option '{option}'")]
    UnknownOption { template: String, option: String },
}

/// Failures while compiling the route table into matchers.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("cannot compile URI template '{template}': {source}")]
    Pattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}
