//! La Recherche Web host.
//!
//! # Architecture Overview
//!
//! ```text
//!     config.toml / BASE_URL
//!            │
//!            ▼
//!     ┌─────────────┐    ┌────────────────┐    ┌──────────────┐
//!     │   config    │───▶│ RouteRegistry  │───▶│  App         │
//!     │ load+check  │    │ build (once)   │    │ install+mount│
//!     └─────────────┘    └────────────────┘    └──────┬───────┘
//!                                                     │
//!     Browser request                                 ▼
//!     ──────────────────────────────────────▶ ┌──────────────┐
//!     ◀────────────────── HTML document ───── │ http server  │
//!                                             └──────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use la_recherche_web::http::HttpServer;
use la_recherche_web::lifecycle::{self, signals, startup, Shutdown};
use la_recherche_web::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "la-recherche-web")]
#[command(about = "Route registry and application host for La Recherche Web", long_about = None)]
struct Cli {
    /// TOML configuration file (built-in routes when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the application (default)
    Serve,
    /// Print the route table as JSON
    Routes,
    /// Resolve a location against the route table
    Resolve {
        /// Location as seen by the browser (e.g. /recherche?q=verne)
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_handle = logging::init(logging::BOOTSTRAP_LEVEL);
    let config = startup::load(cli.config.as_deref())?;
    log_handle.set_level(&config.observability.log_level)?;

    let app = lifecycle::bootstrap(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Routes => {
            println!("{}", serde_json::to_string_pretty(&app.navigation().summaries())?);
        }
        Commands::Resolve { location } => match app.navigation().resolve_location(&location) {
            Ok(resolved) => {
                let output = serde_json::json!({
                    "name": resolved.name(),
                    "path": resolved.path(),
                    "params": resolved.params(),
                    "query": resolved.query(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            Err(not_found) => {
                eprintln!("{}", not_found);
                std::process::exit(1);
            }
        },
        Commands::Serve => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "la-recherche-web starting");

            if config.observability.metrics_enabled {
                if let Ok(addr) = config.observability.metrics_address.parse() {
                    metrics::init_metrics(addr);
                } else {
                    tracing::error!(
                        metrics_address = %config.observability.metrics_address,
                        "Failed to parse metrics address"
                    );
                }
            }

            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");

            let shutdown = Shutdown::new();
            let server_shutdown = shutdown.subscribe();
            tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

            let server = HttpServer::new(config, app);
            server.run(listener, server_shutdown).await?;

            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
