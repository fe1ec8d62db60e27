//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference registered views)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! Route table structure (pattern syntax, collisions) is checked by
//! `RouteRegistry::build`, which is the single owner of those rules.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (AppConfig, ViewRegistry) → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::AppConfig;
use crate::view::ViewRegistry;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route '{route}' references unknown view '{view}'")]
    UnknownView { route: String, view: String },

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a configuration against the views available to the app host.
pub fn validate_config(config: &AppConfig, views: &ViewRegistry) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for route in &config.routes {
        if !views.contains(&route.view) {
            errors.push(ValidationError::UnknownView {
                route: route.name.clone(),
                view: route.view.clone(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
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
    use crate::app::views::default_views;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default(), &default_views()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.routes.push(RouteConfig::new("/aide", "Aide", "aide"));
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config, &default_views()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::UnknownView {
            route: "Aide".into(),
            view: "aide".into(),
        }));
        assert!(errors.contains(&ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        }));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config, &default_views()).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config, &default_views()).is_err());
    }
}
