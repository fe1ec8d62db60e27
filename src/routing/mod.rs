//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     (path, name, view)[] + RouterConfig
//!     → registry.rs (validate, compile patterns, reject collisions)
//!     → Sort by specificity (declaration order breaks ties)
//!     → Freeze as immutable NavigationController
//!
//! Navigation:
//!     browser location
//!     → history.rs (strip base path or read the fragment)
//!     → router.rs (route lookup)
//!     → matcher.rs (segment matching)
//!     → Return: ResolvedRoute or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match in specificity order wins

pub mod history;
pub mod matcher;
pub mod registry;
pub mod route;
pub mod router;

pub use history::HistoryMode;
pub use matcher::{Params, PathPattern, PatternError};
pub use registry::{build, RouteError, RouteRegistry};
pub use route::{NotFound, ResolvedRoute, Route, RouteSummary};
pub use router::NavigationController;
