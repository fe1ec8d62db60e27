//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build the route table once
//! - Install it into the app and mount the app
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Nothing is rendered before mount succeeds

use std::path::Path;
use std::sync::Arc;

use crate::app::views::default_views;
use crate::app::{App, MountError, MountedApp};
use crate::config::{default_config, load_config, AppConfig, ConfigError};
use crate::routing::{RouteError, RouteRegistry};

/// DOM node the application is mounted on.
pub const MOUNT_SELECTOR: &str = "#app";

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("route table rejected: {0}")]
    Routes(#[from] RouteError),

    #[error(transparent)]
    Mount(#[from] MountError),
}

/// Load configuration from `path`, or the built-in one when `None`.
pub fn load(path: Option<&Path>) -> Result<AppConfig, StartupError> {
    let views = default_views();
    let config = match path {
        Some(path) => load_config(path, &views)?,
        None => default_config(&views)?,
    };

    tracing::info!(
        source = %path.map_or_else(|| "built-in".into(), |p| p.display().to_string()),
        base_path = %config.router.base_path,
        history_mode = %config.router.history_mode,
        routes = config.routes.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Build the route table from `config` and mount the application.
pub fn bootstrap(config: &AppConfig) -> Result<MountedApp, StartupError> {
    let navigation = RouteRegistry::from_config(config, &default_views())?;

    let app = App::new(config.title.clone())
        .install(Arc::new(navigation))
        .mount(MOUNT_SELECTOR)?;
    Ok(app)
}
