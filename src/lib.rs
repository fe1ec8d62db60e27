//! Route registry and application host for La Recherche Web.
//!
//! A fixed table of (path, name, view) routes is compiled once into a
//! `NavigationController`, installed into the `App`, and mounted on `#app`.
//! The mounted app is served over HTTP so every route path returns the
//! rendered shell document.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod view;

pub use app::{App, MountedApp};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{NavigationController, RouteRegistry};
