use super::types::{
    ActionLogResponse, ApproveRequest, AuthStatus, CompleteTaskRequest,
    GoalRequest, GoalResponse, HealthResponse, ProductivityScore, SessionSummary,
    TaskStatusMap, TodayResponse, WeeklyReview,
};
use crate::config::SettingsStore;
use crate::error::{DashError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client with no request timeout: a slow backend simply delays the
/// screen that asked.
pub fn build_api_client() -> Client {
    Client::builder()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON client for the planning backend.
///
/// The base URL is read from the settings store on every call, so changing
/// `apiBase` retargets the very next request. Each call is a single attempt.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    settings: Arc<dyn SettingsStore>,
}

impl ApiClient {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_http_client(build_api_client(), settings)
    }

    pub fn with_http_client(http: Client, settings: Arc<dyn SettingsStore>) -> Self {
        Self { http, settings }
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.settings.api_base(), path)
    }

    /// Send one request and return the decoded JSON body.
    pub async fn request(&self, path: &str, method: Method, body: Option<Value>) -> Result<Value> {
        let url = self.url_for(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "api request did not complete");
            DashError::Request {
                status: None,
                message: format!("could not reach {url}: {err}"),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let message = failure_message(status, &bytes);
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "api request failed");
            return Err(DashError::Request {
                status: Some(status.as_u16()),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|err| DashError::Request {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {err}"),
        })?;
        serde_json::from_slice(&bytes).map_err(|err| DashError::Decode(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.request(path, Method::GET, None).await?;
        decode(value)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body).map_err(|err| DashError::Decode(err.to_string()))?;
        let value = self.request(path, Method::POST, Some(body)).await?;
        decode(value)
    }

    /// Browser entry point of the backend's Google sign-in. Not fetched by
    /// the client; the backend answers with a redirect.
    pub fn login_url(&self) -> String {
        self.url_for("/auth/login")
    }

    pub async fn auth_status(&self) -> Result<AuthStatus> {
        self.get("/auth/status").await
    }

    pub async fn submit_goal(&self, request: &GoalRequest) -> Result<GoalResponse> {
        self.post("/goal", request).await
    }

    pub async fn approve(&self, request: &ApproveRequest) -> Result<GoalResponse> {
        self.post("/approve-action", request).await
    }

    pub async fn today(&self) -> Result<TodayResponse> {
        self.get("/today").await
    }

    pub async fn weekly_review(&self) -> Result<WeeklyReview> {
        self.get("/weekly-review").await
    }

    pub async fn productivity_score(&self) -> Result<ProductivityScore> {
        self.get("/productivity-score").await
    }

    /// Full action log, or one session's log when `session_id` is given.
    pub async fn action_log(&self, session_id: Option<&str>) -> Result<ActionLogResponse> {
        let path = match session_id {
            Some(id) => {
                let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
                format!("/action-log?session_id={encoded}")
            }
            None => "/action-log".to_string(),
        };
        self.get(&path).await
    }

    /// The acknowledgement body is not consumed; the caller re-fetches today.
    pub async fn complete_task(&self, request: &CompleteTaskRequest) -> Result<()> {
        let _: Value = self.post("/task/complete", request).await?;
        Ok(())
    }

    pub async fn task_status(&self) -> Result<TaskStatusMap> {
        self.get("/task/status").await
    }

    pub async fn sessions(&self) -> Result<Vec<SessionSummary>> {
        self.get("/sessions").await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| DashError::Decode(err.to_string()))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Human-readable message for a failed response: `detail`, then `message`,
/// then the bare status.
pub(crate) fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| message_field(&value))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn message_field(body: &Value) -> Option<String> {
    ["detail", "message"]
        .iter()
        .find_map(|key| match body.get(key)? {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}
