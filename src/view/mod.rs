//! View capability seam.
//!
//! # Data Flow
//! ```text
//! RouteConfig.view ("home", "recherche", ...)
//!     → ViewRegistry (name → Arc<dyn Renderable>)
//!     → Route.view (opaque, passed through by the registry)
//!     → app host calls render() after resolution
//! ```
//!
//! # Design Decisions
//! - The routing layer never inspects a view; it only clones the `Arc`
//! - Concrete views live in the app layer (`crate::app::views`)

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::ResolvedRoute;

/// Error produced while rendering a view.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("cannot link to route: {0}")]
    Link(#[from] crate::routing::RouteError),
}

/// Anything the app host can draw into the mount point.
pub trait Renderable: Send + Sync + fmt::Debug {
    /// Render the view for a resolved location as an HTML fragment.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Shared handle to a view.
pub type ViewRef = Arc<dyn Renderable>;

/// What a view gets to see when it is rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The matched route, including path params and query.
    pub resolved: &'a ResolvedRoute,

    /// Controller used to build links to other routes.
    pub navigation: &'a crate::routing::NavigationController,
}

/// Views addressable by the names used in configuration files.
#[derive(Default, Clone)]
pub struct ViewRegistry {
    views: BTreeMap<String, ViewRef>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under `name`, replacing any previous entry.
    pub fn register(mut self, name: impl Into<String>, view: ViewRef) -> Self {
        self.views.insert(name.into(), view);
        self
    }

    pub fn get(&self, name: &str) -> Option<ViewRef> {
        self.views.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.views.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Blank;

    impl Renderable for Blank {
        fn render(&self, _ctx: &RenderContext<'_>) -> Result<String, RenderError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_registry_lookup() {
        let views = ViewRegistry::new().register("blank", Arc::new(Blank));

        assert!(views.contains("blank"));
        assert!(views.get("blank").is_some());
        assert!(views.get("missing").is_none());
        assert_eq!(views.names().collect::<Vec<_>>(), vec!["blank"]);
    }
}
