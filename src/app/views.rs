//! Concrete views of the application.

use std::sync::Arc;

use askama::Template;

use crate::routing::Params;
use crate::view::{RenderContext, RenderError, Renderable, ViewRegistry};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    search_action: Option<String>,
}

#[derive(Template)]
#[template(path = "recherche.html")]
struct RechercheTemplate<'a> {
    action: String,
    term: &'a str,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub(crate) struct NotFoundTemplate<'a> {
    pub(crate) path: &'a str,
    pub(crate) home_href: &'a str,
}

/// Landing page. Offers the search form when a "Recherche" route exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct HomeView;

impl Renderable for HomeView {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let search_action = ctx.navigation.href("Recherche", &Params::new()).ok();
        Ok(HomeTemplate { search_action }.render()?)
    }
}

/// Search page. Echoes the `q` query parameter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RechercheView;

impl Renderable for RechercheView {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let action = ctx.navigation.href(ctx.resolved.name(), ctx.resolved.params())?;
        let term = ctx.resolved.query_value("q").unwrap_or_default().trim();
        Ok(RechercheTemplate { action, term }.render()?)
    }
}

/// Fallback page, also usable as the view of a catch-all route.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundView;

impl Renderable for NotFoundView {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let config = ctx.navigation.config();
        let home_href = config.history_mode.href(&config.base_path, "/");
        Ok(NotFoundTemplate {
            path: ctx.resolved.path(),
            home_href: &home_href,
        }
        .render()?)
    }
}

/// Views addressable from configuration files.
pub fn default_views() -> ViewRegistry {
    ViewRegistry::new()
        .register("home", Arc::new(HomeView))
        .register("recherche", Arc::new(RechercheView))
        .register("not_found", Arc::new(NotFoundView))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::routing::{NavigationController, RouteRegistry};

    fn navigation() -> NavigationController {
        RouteRegistry::new(RouterConfig::new("/laRechercheWeb/", Default::default()))
            .route("/", "Home", Arc::new(HomeView))
            .route("/recherche", "Recherche", Arc::new(RechercheView))
            .route("/:rest*", "Perdu", Arc::new(NotFoundView))
            .build()
            .unwrap()
    }

    fn render(nav: &NavigationController, path: &str) -> String {
        let resolved = nav.resolve(path).unwrap();
        let ctx = RenderContext {
            resolved: &resolved,
            navigation: nav,
        };
        resolved.route().view().render(&ctx).unwrap()
    }

    #[test]
    fn test_home_links_to_search() {
        let html = render(&navigation(), "/");
        assert!(html.contains("<form"));
        assert!(html.contains("laRechercheWeb"));
    }

    #[test]
    fn test_home_without_search_route() {
        let nav = RouteRegistry::new(RouterConfig::default())
            .route("/", "Home", Arc::new(HomeView))
            .build()
            .unwrap();
        let html = render(&nav, "/");
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_recherche_escapes_term() {
        let html = render(&navigation(), "/recherche?q=%3Cb%3Everne%3C%2Fb%3E");
        assert!(html.contains("&lt;b&gt;verne&lt;"));
        assert!(!html.contains("<b>verne"));
    }

    #[test]
    fn test_recherche_without_term() {
        let html = render(&navigation(), "/recherche");
        assert!(html.contains("Aucun terme"));
    }

    #[test]
    fn test_catch_all_not_found_view() {
        let html = render(&navigation(), "/nulle/part");
        assert!(html.contains("Page introuvable"));
        assert!(html.contains("nulle"));
        assert!(html.contains("laRechercheWeb"));
    }
}
