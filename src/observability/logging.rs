//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem before configuration is read
//! - Switch to the configured log level once it is known
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Level used while configuration is being loaded.
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Default filter directives for a configured level.
pub fn default_directives(level: &str) -> String {
    format!("la_recherche_web={level},tower_http={level}")
}

/// Handle on the installed filter.
///
/// Empty when `RUST_LOG` is set or another subscriber was already installed.
pub struct LogHandle {
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Replace the filter with the directives for `level`.
    pub fn set_level(&self, level: &str) -> Result<(), reload::Error> {
        match &self.filter {
            Some(filter) => filter.reload(EnvFilter::new(default_directives(level))),
            None => Ok(()),
        }
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(level: &str) -> LogHandle {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_override = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| default_directives(level).into());
    let (filter, handle) = reload::Layer::new(filter);

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
        return LogHandle { filter: None };
    }

    LogHandle {
        filter: (!env_override).then_some(handle),
    }
}
