//! Route and resolution types.

use std::sync::Arc;

use serde::Serialize;

use crate::routing::matcher::Params;
use crate::view::ViewRef;

/// A URL pattern bound to a name and a view.
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    name: String,
    view: ViewRef,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: ViewRef) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }

    /// The pattern as written in the table.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The view reference, passed through untouched.
    pub fn view(&self) -> &ViewRef {
        &self.view
    }
}

// Views are opaque, so two routes are equal only when they share the same view instance.
impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.name == other.name && Arc::ptr_eq(&self.view, &other.view)
    }
}

impl Eq for Route {}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    route: Route,
    path: String,
    params: Params,
    query: Params,
}

impl ResolvedRoute {
    pub(crate) fn new(route: Route, path: String, params: Params, query: Params) -> Self {
        Self {
            route,
            path,
            params,
            query,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// Normalized requested path, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Captured path parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Decoded query pairs.
    pub fn query(&self) -> &Params {
        &self.query
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// No route matches the requested path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route matches '{path}'")]
pub struct NotFound {
    pub path: String,
}

/// Serializable view of a route table entry.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub href: String,
}
