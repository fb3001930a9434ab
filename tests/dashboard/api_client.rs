use focusboard::{ApiClient, DashError, MemorySettingsStore, SettingKey, SettingsStore};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> (ApiClient, Arc<MemorySettingsStore>) {
    let settings = Arc::new(MemorySettingsStore::with_api_base(base));
    let store: Arc<dyn SettingsStore> = settings.clone();
    (ApiClient::new(store), settings)
}

#[tokio::test]
async fn error_detail_becomes_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/today"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.today().await.unwrap_err();

    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/today"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.today().await.unwrap_err();

    assert!(matches!(err, DashError::Request { .. }));
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.health().await.unwrap_err();

    assert!(matches!(err, DashError::Decode(_)));
}

#[tokio::test]
async fn requests_declare_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/status"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let value = client
        .request("/auth/status", Method::GET, None)
        .await
        .unwrap();

    assert_eq!(value, json!({"authenticated": true}));
}

#[tokio::test]
async fn changed_api_base_retargets_the_next_request() {
    let old = MockServer::start().await;
    let new = MockServer::start().await;
    for server in [&old, &new] {
        Mock::given(method("GET"))
            .and(path("/productivity-score"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"productivity_score": 6, "health": "at_risk"})),
            )
            .mount(server)
            .await;
    }

    let (client, settings) = client_for(&old.uri());
    client.productivity_score().await.unwrap();

    settings
        .set(SettingKey::ApiBase, Some(&format!("{}/", new.uri())))
        .unwrap();
    let score = client.productivity_score().await.unwrap();

    assert_eq!(score.health.as_deref(), Some("at_risk"));
    assert_eq!(old.received_requests().await.unwrap().len(), 1);
    let received = new.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/productivity-score");
}

#[tokio::test]
async fn session_action_log_is_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/action-log"))
        .and(query_param("session_id", "s 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s 1",
            "action_log": [{"action": "create_calendar_event", "success": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let log = client.action_log(Some("s 1")).await.unwrap();

    assert_eq!(log.session_id.as_deref(), Some("s 1"));
    assert_eq!(log.action_log.len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_request_failure_without_status() {
    let (client, _) = client_for("http://127.0.0.1:1");
    let err = client.auth_status().await.unwrap_err();

    assert!(matches!(err, DashError::Request { status: None, .. }));
}
