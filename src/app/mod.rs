//! Application bootstrap.
//!
//! # Data Flow
//! ```text
//! App::new(title)
//!     → install(Arc<NavigationController>)   (before first render)
//!     → mount("#app")                        → MountedApp
//!     → render(location)
//!         → NavigationController::resolve_location
//!         → view.render() into the mount point
//!         → shell document (or NotFound view + NotFound status)
//! ```
//!
//! # Design Decisions
//! - No global router: the controller is passed in explicitly
//! - Mounting without an installed controller is an error, not a blank page

pub mod views;

use std::sync::Arc;
use std::time::Instant;

use askama::Template;

use crate::observability::metrics;
use crate::routing::{NavigationController, Params, ResolvedRoute};
use crate::view::{RenderContext, RenderError};

use self::views::NotFoundTemplate;

/// Errors raised while mounting the application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("no navigation controller installed before mount")]
    NotInstalled,

    #[error("mount target '{0}' is not an id selector")]
    InvalidSelector(String),
}

/// Application root, before mounting.
#[derive(Debug)]
pub struct App {
    title: String,
    navigation: Option<Arc<NavigationController>>,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            navigation: None,
        }
    }

    /// Install the navigation controller. A later call replaces the previous one.
    pub fn install(mut self, navigation: Arc<NavigationController>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Attach the app to a DOM node given as an id selector ("#app").
    pub fn mount(self, selector: &str) -> Result<MountedApp, MountError> {
        let mount_id = selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
            .ok_or_else(|| MountError::InvalidSelector(selector.to_string()))?;
        let navigation = self.navigation.ok_or(MountError::NotInstalled)?;

        tracing::info!(
            mount = %selector,
            routes = navigation.len(),
            base_path = %navigation.config().base_path,
            "Application mounted"
        );

        Ok(MountedApp {
            title: self.title,
            mount_id: mount_id.to_string(),
            navigation,
        })
    }
}

/// Outcome of rendering a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Found,
    NotFound,
}

/// A rendered HTML document.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub status: RenderStatus,
    /// Name of the matched route, if any.
    pub route: Option<String>,
    pub html: String,
}

struct NavLink {
    name: String,
    href: String,
    active: bool,
}

#[derive(Template)]
#[template(path = "shell.html")]
struct ShellTemplate<'a> {
    title: &'a str,
    base_path: &'a str,
    mount_id: &'a str,
    links: Vec<NavLink>,
    content: &'a str,
}

/// A mounted application, ready to render locations.
#[derive(Debug, Clone)]
pub struct MountedApp {
    title: String,
    mount_id: String,
    navigation: Arc<NavigationController>,
}

impl MountedApp {
    pub fn navigation(&self) -> &Arc<NavigationController> {
        &self.navigation
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the document for a browser location.
    pub fn render(&self, location: &str) -> Result<Rendered, RenderError> {
        let start = Instant::now();

        let rendered = match self.navigation.resolve_location(location) {
            Ok(resolved) => self.render_route(&resolved)?,
            Err(not_found) => {
                tracing::debug!(location = %location, path = %not_found.path, "No route matched");
                metrics::record_not_found();

                let config = self.navigation.config();
                let home_href = config.history_mode.href(&config.base_path, "/");
                let content = NotFoundTemplate {
                    path: &not_found.path,
                    home_href: &home_href,
                }
                .render()?;

                Rendered {
                    status: RenderStatus::NotFound,
                    route: None,
                    html: self.document(&content, None)?,
                }
            }
        };

        metrics::record_render(start);
        Ok(rendered)
    }

    fn render_route(&self, resolved: &ResolvedRoute) -> Result<Rendered, RenderError> {
        let ctx = RenderContext {
            resolved,
            navigation: &self.navigation,
        };
        let content = resolved.route().view().render(&ctx)?;
        metrics::record_resolution(resolved.name());

        Ok(Rendered {
            status: RenderStatus::Found,
            route: Some(resolved.name().to_string()),
            html: self.document(&content, Some(resolved.name()))?,
        })
    }

    fn document(&self, content: &str, active: Option<&str>) -> Result<String, RenderError> {
        let links = self
            .navigation
            .routes()
            .filter_map(|route| {
                let href = self.navigation.href(route.name(), &Params::new()).ok()?;
                Some(NavLink {
                    name: route.name().to_string(),
                    href,
                    active: active == Some(route.name()),
                })
            })
            .collect();

        let shell = ShellTemplate {
            title: &self.title,
            base_path: &self.navigation.config().base_path,
            mount_id: &self.mount_id,
            links,
            content,
        };
        Ok(shell.render()?)
    }
}
