//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the app host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::HistoryMode;

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Document title shown by the shell.
    pub title: String,

    /// Navigation settings (base path, history strategy).
    pub router: RouterConfig,

    /// Route table, in matching priority order.
    pub routes: Vec<RouteConfig>,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "La Recherche Web".to_string(),
            router: RouterConfig::default(),
            routes: vec![
                RouteConfig::new("/", "Home", "home"),
                RouteConfig::new("/recherche", "Recherche", "recherche"),
            ],
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Navigation settings shared by every route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// URL prefix the whole application is served under.
    pub base_path: String,

    /// How in-app navigation is reflected in the URL bar.
    pub history_mode: HistoryMode,
}

impl RouterConfig {
    pub fn new(base_path: impl Into<String>, history_mode: HistoryMode) -> Self {
        Self {
            base_path: normalize_base_path(&base_path.into()),
            history_mode,
        }
    }

    /// Build from an environment lookup. `BASE_URL` sets the base path;
    /// an unset or empty value means "/".
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("BASE_URL").unwrap_or_default();
        Self::new(base, HistoryMode::default())
    }

    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            history_mode: HistoryMode::default(),
        }
    }
}

/// Normalize a base path to the `/segment/.../` form.
///
/// Empty input becomes "/", a missing leading or trailing slash is added.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URL pattern (e.g. "/", "/recherche", "/livre/:id").
    pub path: String,

    /// Unique route name.
    pub name: String,

    /// Name of the view registered in the `ViewRegistry`.
    pub view: String,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_defaults_to_root_without_env() {
        let config = RouterConfig::from_lookup(|_| None);
        assert_eq!(config.base_path, "/");
        assert_eq!(config.history_mode, HistoryMode::Browser);
    }

    #[test]
    fn test_base_path_from_env() {
        let config = RouterConfig::from_lookup(|key| {
            (key == "BASE_URL").then(|| "/laRechercheWeb/".to_string())
        });
        assert_eq!(config.base_path, "/laRechercheWeb/");

        let empty = RouterConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(empty.base_path, "/");
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path(""), "/");
        assert_eq!(normalize_base_path("/"), "/");
        assert_eq!(normalize_base_path("app"), "/app/");
        assert_eq!(normalize_base_path("/app"), "/app/");
        assert_eq!(normalize_base_path("/a/b/"), "/a/b/");
    }

    #[test]
    fn test_default_routes() {
        let config = AppConfig::default();
        let names: Vec<_> = config.routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Recherche"]);
    }
}
