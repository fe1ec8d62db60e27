//! HTTP delivery of the mounted application.

use axum::http::StatusCode;
use la_recherche_web::routing::HistoryMode;

mod common;

#[tokio::test]
async fn test_serves_home_at_root() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let response = common::get(&server, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = common::text(response).await;
    assert!(body.contains(r#"<div id="app">"#));
    assert!(body.contains("Bienvenue"));
}

#[tokio::test]
async fn test_serves_recherche_with_query() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let response = common::get(&server, "/recherche?q=verne").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::text(response).await.contains("verne"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let response = common::get(&server, "/inconnue").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(common::text(response).await.contains("Page introuvable"));
}

#[tokio::test]
async fn test_double_slash_target_is_not_a_host() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let response = common::get(&server, "//evil.example/recherche").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_percent_encoded_query_term_is_decoded() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let response = common::get(&server, "/recherche/?q=caf%C3%A9").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::text(response).await.contains("café"));
}

#[tokio::test]
async fn test_base_path_is_respected() {
    let server = common::server(common::config("/laRechercheWeb/", HistoryMode::Browser));

    assert_eq!(common::get(&server, "/laRechercheWeb/recherche").await.status(), StatusCode::OK);
    assert_eq!(common::get(&server, "/laRechercheWeb").await.status(), StatusCode::OK);
    assert_eq!(common::get(&server, "/recherche").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hash_mode_serves_base_only() {
    let server = common::server(common::config("/", HistoryMode::Hash));

    assert_eq!(common::get(&server, "/").await.status(), StatusCode::OK);
    assert_eq!(common::get(&server, "/recherche").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let request = axum::http::Request::builder()
        .uri("/")
        .header("x-request-id", "demande-1")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(server.router(), request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "demande-1");
}

#[tokio::test]
async fn test_post_is_rejected() {
    let server = common::server(common::config("/", HistoryMode::Browser));

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/recherche")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(server.router(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_route_table_endpoint() {
    let server = common::server(common::config("/laRechercheWeb/", HistoryMode::Hash));

    let response = common::get(&server, "/_routes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let table: serde_json::Value = serde_json::from_str(&common::text(response).await).unwrap();
    assert_eq!(table["base_path"], "/laRechercheWeb/");
    assert_eq!(table["history_mode"], "hash");
    assert_eq!(table["routes"][1]["name"], "Recherche");
    assert_eq!(table["routes"][1]["href"], "/laRechercheWeb/#/recherche");
}
