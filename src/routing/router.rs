//! Route lookup and reverse routing.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a requested path or browser location
//! - Build hrefs for named routes
//! - Return matched route or explicit NotFound
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) name lookup via HashMap
//! - O(n) scan in specificity order (acceptable for typical route counts)
//! - Explicit NotFound rather than silent default

use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::RouterConfig;
use crate::routing::matcher::{decode_path, parse_query, path_segments, split_request, Params, PathPattern};
use crate::routing::registry::RouteError;
use crate::routing::route::{NotFound, ResolvedRoute, Route, RouteSummary};

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) route: Route,
    pub(crate) pattern: PathPattern,
}

/// Navigation handler bound to a route table and a history strategy.
///
/// Built once by `RouteRegistry` and shared by reference (usually `Arc`)
/// with whatever owns the UI root.
#[derive(Debug)]
pub struct NavigationController {
    config: RouterConfig,
    entries: Vec<Entry>,
    /// Indices into `entries`, most specific first.
    order: Vec<usize>,
    by_name: HashMap<String, usize>,
}

impl NavigationController {
    pub(crate) fn new(
        config: RouterConfig,
        entries: Vec<Entry>,
        order: Vec<usize>,
        by_name: HashMap<String, usize>,
    ) -> Self {
        Self {
            config,
            entries,
            order,
            by_name,
        }
    }

    /// Resolve an app-relative path such as "/recherche?q=verne".
    ///
    /// Query and fragment never take part in matching. Percent-encoded and
    /// literal forms of the same path resolve alike.
    pub fn resolve(&self, requested: &str) -> Result<ResolvedRoute, NotFound> {
        let (path, query) = split_request(requested);
        let decoded: Vec<Cow<'_, str>> = path_segments(path).into_iter().map(decode_path).collect();
        let segments: Vec<&str> = decoded.iter().map(AsRef::as_ref).collect();

        for &index in &self.order {
            let entry = &self.entries[index];
            if let Some(params) = entry.pattern.matches(&segments) {
                tracing::trace!(path = %path, route = %entry.route.name(), "Route matched");
                return Ok(ResolvedRoute::new(
                    entry.route.clone(),
                    format!("/{}", segments.join("/")),
                    params,
                    parse_query(query),
                ));
            }
        }

        Err(NotFound {
            path: decode_path(path).into_owned(),
        })
    }

    /// Resolve a browser location (absolute URL or origin path) according to
    /// the configured base path and history mode.
    pub fn resolve_location(&self, location: &str) -> Result<ResolvedRoute, NotFound> {
        let app_path = self
            .config
            .history_mode
            .app_path(&self.config.base_path, location)
            .ok_or_else(|| NotFound {
                path: location.to_string(),
            })?;
        self.resolve(&app_path)
    }

    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.entries[index].route)
    }

    /// URL for the named route, including base path and history prefix.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let path = self.path_for(name, params)?;
        Ok(self.config.history_mode.href(&self.config.base_path, &path))
    }

    /// URL for the named route with a query string appended.
    pub fn href_with_query(&self, name: &str, params: &Params, query: &Params) -> Result<String, RouteError> {
        let mut path = self.path_for(name, params)?;
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            path.push('?');
            path.push_str(&encoded);
        }
        Ok(self.config.history_mode.href(&self.config.base_path, &path))
    }

    fn path_for(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let &index = self
            .by_name
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        self.entries[index]
            .pattern
            .fill(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|entry| &entry.route)
    }

    /// Declaration-order listing. Routes that need params keep their
    /// pattern in the href, under the same base and history prefix.
    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes()
            .map(|route| RouteSummary {
                name: route.name().to_string(),
                path: route.path().to_string(),
                href: self.href(route.name(), &Params::new()).unwrap_or_else(|_| {
                    self.config.history_mode.href(&self.config.base_path, route.path())
                }),
            })
            .collect()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
