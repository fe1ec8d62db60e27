//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Answer every app location with the rendered shell document
//! - Expose the route table for inspection
//! - Graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::{MountedApp, RenderStatus};
use crate::config::AppConfig;
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::shutdown;
use crate::routing::{HistoryMode, RouteSummary};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<MountedApp>,
}

/// HTTP server delivering the mounted application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    pub fn new(config: AppConfig, app: MountedApp) -> Self {
        let state = AppState { app: Arc::new(app) };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/_routes", get(list_routes))
            .fallback(app_handler)
            .with_state(state)
            .layer(middleware)
    }

    /// A clone of the configured router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown_rx: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.router.base_path,
            history_mode = %self.config.router.history_mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Render the document for any location.
async fn app_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    }

    let location = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    match state.app.render(location) {
        Ok(rendered) => {
            let status = match rendered.status {
                RenderStatus::Found => StatusCode::OK,
                RenderStatus::NotFound => StatusCode::NOT_FOUND,
            };
            tracing::debug!(
                location = %location,
                route = rendered.route.as_deref().unwrap_or("-"),
                status = status.as_u16(),
                "Document rendered"
            );
            (status, Html(rendered.html)).into_response()
        }
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Render failed").into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct RouteTable {
    base_path: String,
    history_mode: HistoryMode,
    routes: Vec<RouteSummary>,
}

/// The route table as JSON.
async fn list_routes(State(state): State<AppState>) -> Json<RouteTable> {
    let navigation = state.app.navigation();
    Json(RouteTable {
        base_path: navigation.config().base_path.clone(),
        history_mode: navigation.config().history_mode,
        routes: navigation.summaries(),
    })
}
