mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shorty::api::handlers::redirect_handler;
use shorty::state::AppState;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = common::create_test_state();
    common::create_test_mapping(&store, "aB3dE", "https://example.com/target").await;
    let server = server(state);

    let response = server.get("/aB3dE").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (state, store) = common::create_test_state();
    common::create_test_mapping(&store, "aB3dE", "https://example.com/target").await;
    let server = server(state);

    let response = server.get("/ab3de").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), common::TEST_FALLBACK_URL);
}

#[tokio::test]
async fn test_redirect_unknown_code_uses_fallback() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    let response = server.get("/doesnotexist").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), common::TEST_FALLBACK_URL);
}

#[tokio::test]
async fn test_redirect_store_unavailable_uses_fallback() {
    let state = common::state_with_store(Arc::new(common::UnavailableStore));
    let server = server(state);

    let response = server.get("/aB3dE").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), common::TEST_FALLBACK_URL);
}
