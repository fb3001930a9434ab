use crate::render_harness::{Event, Harness};
use focusboard::poll::{ConnectionStatus, spawn_connectivity_poll};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn auth_server(authenticated: bool) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"authenticated": authenticated})),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn authenticated_backend_is_connected() {
    let server = auth_server(true).await;
    let h = Harness::new(&server);

    let status = h.controller.check_connectivity().await;

    assert_eq!(status, ConnectionStatus::Connected);
    assert_eq!(h.controller.snapshot().connection, ConnectionStatus::Connected);
    assert_eq!(
        h.renderer.events(),
        vec![Event::Connection(ConnectionStatus::Connected)]
    );
}

#[tokio::test]
async fn unauthenticated_backend_is_disconnected() {
    let server = auth_server(false).await;
    let h = Harness::new(&server);

    assert_eq!(
        h.controller.check_connectivity().await,
        ConnectionStatus::Disconnected
    );
}

#[tokio::test]
async fn unreachable_backend_is_disconnected_without_a_notification() {
    let h = Harness::against("http://127.0.0.1:1");

    assert_eq!(
        h.controller.check_connectivity().await,
        ConnectionStatus::Disconnected
    );
    assert!(h.renderer.notifications().is_empty());
}

#[tokio::test]
async fn status_follows_the_backend_between_checks() {
    let server = auth_server(true).await;
    let h = Harness::new(&server);
    assert_eq!(
        h.controller.check_connectivity().await,
        ConnectionStatus::Connected
    );

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/auth/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(
        h.controller.check_connectivity().await,
        ConnectionStatus::Disconnected
    );
    assert_eq!(
        h.controller.snapshot().connection,
        ConnectionStatus::Disconnected
    );
}

#[tokio::test]
async fn poll_checks_immediately_and_keeps_running() {
    let server = auth_server(true).await;
    let h = Harness::new(&server);

    let handle = spawn_connectivity_poll(Arc::clone(&h.controller), Duration::from_secs(1));

    let mut seen = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if h
            .renderer
            .events()
            .contains(&Event::Connection(ConnectionStatus::Connected))
        {
            seen = true;
            break;
        }
    }
    handle.abort();

    assert!(seen, "first poll tick should run right away");
    assert!(!server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_points_at_the_current_backend() {
    let h = Harness::against("http://10.0.0.7:8000/");

    let url = h.controller.show_login();

    assert_eq!(url, "http://10.0.0.7:8000/auth/login");
    let notes = h.renderer.notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("http://10.0.0.7:8000/auth/login"));
}

#[tokio::test]
async fn login_url_follows_a_changed_backend() {
    let h = Harness::against("http://localhost:8000");
    h.controller
        .save_settings(Some("https://plan.example.com/"), None)
        .unwrap();

    assert_eq!(
        h.controller.show_login(),
        "https://plan.example.com/auth/login"
    );
}
