//! Route table construction.
//!
//! # Responsibilities
//! - Collect (path, name, view) triples in declaration order
//! - Compile every path and reject invalid or colliding entries
//! - Freeze the result into an immutable `NavigationController`
//!
//! # Design Decisions
//! - All checks happen here, once, before the first render
//! - Entries are ranked by specificity; equal ranks keep declaration order

use std::collections::HashMap;

use crate::config::{AppConfig, RouterConfig};
use crate::routing::matcher::{PathPattern, PatternError};
use crate::routing::route::Route;
use crate::routing::router::{Entry, NavigationController};
use crate::view::{ViewRef, ViewRegistry};

/// Configuration and lookup errors of the route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("routes '{first}' and '{second}' share the path '{path}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("route name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("invalid path '{path}' for route '{name}': {reason}")]
    InvalidPattern {
        path: String,
        name: String,
        #[source]
        reason: PatternError,
    },

    #[error("route '{route}' references unknown view '{view}'")]
    UnknownView { route: String, view: String },

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("route '{route}' needs parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// Declarative builder for a route table.
///
/// ```ignore
/// let navigation = RouteRegistry::new(RouterConfig::from_env())
///     .route("/", "Home", home)
///     .route("/recherche", "Recherche", recherche)
///     .build()?;
/// ```
#[derive(Debug)]
pub struct RouteRegistry {
    config: RouterConfig,
    routes: Vec<Route>,
}

impl RouteRegistry {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            routes: Vec::new(),
        }
    }

    /// Append a route. Declaration order breaks specificity ties.
    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>, view: ViewRef) -> Self {
        self.routes.push(Route::new(path, name, view));
        self
    }

    /// Build a controller from a loaded configuration, looking views up by name.
    pub fn from_config(config: &AppConfig, views: &ViewRegistry) -> Result<NavigationController, RouteError> {
        let mut registry = Self::new(config.router.clone());
        for entry in &config.routes {
            let view = views.get(&entry.view).ok_or_else(|| RouteError::UnknownView {
                route: entry.name.clone(),
                view: entry.view.clone(),
            })?;
            registry = registry.route(entry.path.clone(), entry.name.clone(), view);
        }
        registry.build()
    }

    pub fn build(self) -> Result<NavigationController, RouteError> {
        build(self.routes, self.config)
    }
}

/// Compile `routes` into a controller bound to `config`.
pub fn build(routes: Vec<Route>, config: RouterConfig) -> Result<NavigationController, RouteError> {
    let mut by_name = HashMap::with_capacity(routes.len());
    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(routes.len());
    let mut entries = Vec::with_capacity(routes.len());

    for (index, route) in routes.into_iter().enumerate() {
        let pattern = PathPattern::parse(route.path()).map_err(|reason| RouteError::InvalidPattern {
            path: route.path().to_string(),
            name: route.name().to_string(),
            reason,
        })?;

        if by_name.insert(route.name().to_string(), index).is_some() {
            return Err(RouteError::DuplicateName(route.name().to_string()));
        }

        if let Some(&first) = by_key.get(&pattern.key()) {
            let first: &Entry = &entries[first];
            return Err(RouteError::DuplicatePath {
                path: route.path().to_string(),
                first: first.route.name().to_string(),
                second: route.name().to_string(),
            });
        }
        by_key.insert(pattern.key(), index);

        entries.push(Entry { route, pattern });
    }

    let mut order: Vec<usize> = (0..entries.len()).collect();
    // Stable sort: ties keep declaration order.
    order.sort_by(|&a, &b| entries[b].pattern.cmp_specificity(&entries[a].pattern));

    tracing::info!(
        routes = entries.len(),
        base_path = %config.base_path,
        history_mode = %config.history_mode,
        "Route table built"
    );

    Ok(NavigationController::new(config, entries, order, by_name))
}
