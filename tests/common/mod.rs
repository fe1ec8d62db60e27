//! Shared helpers for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{Request, Response};
use la_recherche_web::config::{AppConfig, RouterConfig};
use la_recherche_web::http::HttpServer;
use la_recherche_web::lifecycle::{bootstrap, Shutdown};
use la_recherche_web::routing::HistoryMode;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Default configuration with the given router settings.
pub fn config(base_path: &str, history_mode: HistoryMode) -> AppConfig {
    let mut config = AppConfig::default();
    config.router = RouterConfig::new(base_path, history_mode);
    config
}

/// Build a server for `config` without binding a socket.
pub fn server(config: AppConfig) -> HttpServer {
    let app = bootstrap(&config).unwrap();
    HttpServer::new(config, app)
}

/// Send one GET request through the router.
#[allow(dead_code)]
pub async fn get(server: &HttpServer, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    server.router().oneshot(request).await.unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a live server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = server(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
