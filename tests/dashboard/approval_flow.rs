use crate::render_harness::{Harness, Rendered, request_count};
use focusboard::{SettingKey, SettingsStore};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn no_session_means_no_request_even_with_selection() {
    let server = MockServer::start().await;
    let h = Harness::new(&server);

    let err = h
        .controller
        .approve(&ids(&["task_01", "task_02"]))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(request_count(&server).await, 0);
    assert_eq!(h.renderer.errors().len(), 1);
}

#[tokio::test]
async fn empty_selection_means_no_request() {
    let server = MockServer::start().await;
    let h = Harness::new(&server);
    h.settings.set(SettingKey::CurrentSession, Some("s-1")).unwrap();

    let err = h.controller.approve(&[]).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(request_count(&server).await, 0);
    assert_eq!(
        h.renderer.errors(),
        vec!["Select at least one task to approve.".to_string()]
    );
}

#[tokio::test]
async fn approval_sends_session_and_selection_then_refreshes_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/approve-action"))
        .and(body_json(json!({
            "session_id": "s-1",
            "approved_task_ids": ["task_01", "task_03"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-1",
            "status": "executed",
            "execution_results": [
                {"task_id": "task_01", "action": "create_calendar_event", "success": true, "event_link": "https://cal/1"},
                {"task_id": "task_03", "action": "create_calendar_event", "success": false, "error": "Failed after 3 attempts."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plan": {"goal": "g", "subtasks": [{"id": "task_01"}]},
            "calendar_events": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/productivity-score"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"productivity_score": 8, "health": "on_track"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.settings.set(SettingKey::CurrentSession, Some("s-1")).unwrap();

    let response = h
        .controller
        .approve(&ids(&["task_01", " ", "task_03"]))
        .await
        .unwrap();

    assert_eq!(response.status, "executed");
    assert_eq!(response.execution_results.as_ref().unwrap().len(), 2);

    let state = h.controller.snapshot();
    assert_eq!(state.last_response.unwrap().status, "executed");
    assert!(state.productivity.is_some());
    assert!(h.renderer.errors().is_empty());
    assert!(
        h.renderer
            .rendered()
            .iter()
            .any(|r| matches!(r, Rendered::GoalResult(resp) if resp.status == "executed"))
    );
}

#[tokio::test]
async fn rejected_approval_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/approve-action"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Session is in status 'executed', not 'awaiting_approval'."
        })))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.settings.set(SettingKey::CurrentSession, Some("s-1")).unwrap();

    let err = h.controller.approve(&ids(&["task_01"])).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        h.renderer.errors(),
        vec!["Session is in status 'executed', not 'awaiting_approval'.".to_string()]
    );
    assert!(h.controller.snapshot().last_response.is_none());
}
