//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check controller references and module names are well-formed
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - A missing default route is a bootstrap error, since code may supply an
//!   invokable fallback instead

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;
use crate::module::is_valid_module_name;
use crate::routing::ControllerRef;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if let Some(default_route) = &config.application.default_route {
        if ControllerRef::parse(default_route).is_none() {
            errors.push(ValidationError::new(
                "application.default_route",
                format!("'{}' is not in Module:Controller@action notation", default_route),
            ));
        }
    }

    for name in &config.application.core_modules {
        if !is_valid_module_name(name) {
            errors.push(ValidationError::new(
                "application.core_modules",
                format!("invalid module name '{}'", name),
            ));
        }
    }
    for name in &config.modules.names {
        if !is_valid_module_name(name) {
            errors.push(ValidationError::new(
                "modules.names",
                format!("invalid module name '{}'", name),
            ));
        }
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !route.template.starts_with('/') {
            errors.push(ValidationError::new(
                format!("routes[{}].template", i),
                format!("'{}' must start with '/'", route.template),
            ));
        }
        if let Some(controller) = &route.options.controller {
            if ControllerRef::parse(controller).is_none() {
                errors.push(ValidationError::new(
                    format!("routes[{}].controller", i),
                    format!("'{}' is not in Module:Controller@action notation", controller),
                ));
            }
        }
    }

    for (from, to) in &config.redirects {
        if from == to {
            errors.push(ValidationError::new(
                "redirects",
                format!("'{}' redirects to itself", from),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::RouteOptions;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 0;
        config.application.default_route = Some("Site:Main".into());
        config.application.core_modules = vec!["site".into()];
        config.modules.names = vec!["Blog2".into()];
        config.routes.push(RouteConfig {
            template: "about".into(),
            options: RouteOptions::controller("Site@about"),
        });
        config.redirects.insert("/loop".into(), "/loop".into());

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "server.request_timeout_secs",
                "application.default_route",
                "application.core_modules",
                "modules.names",
                "routes[0].template",
                "routes[0].controller",
                "redirects",
            ]
        );
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = AppConfig::default();
        config.server.bind_address = "localhost".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "server.bind_address");
        assert!(errors[0].to_string().contains("localhost"));
    }
}
