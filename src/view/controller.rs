//! One procedure per screen.
//!
//! Every operation follows the same shape: call the backend, and only on
//! success replace the matching `ViewState` slot and re-render. Failures
//! become a notification and leave the state untouched. Operations still
//! return their `Result` so callers can pick an exit status.

use super::forms::{GoalForm, deadline_to_utc, non_blank};
use super::render::{Notification, Renderer, SettingsSnapshot, View};
use super::state::{TodayView, ViewState};
use crate::api::{
    ActionLogEntry, ApiClient, ApproveRequest, CompleteTaskRequest, GoalRequest, GoalResponse,
    HealthResponse, ProductivityScore, SessionSummary, TaskStatusMap, WeeklyReview,
};
use crate::config::{SettingKey, SettingsStore};
use crate::error::{DashError, Result};
use crate::poll::ConnectionStatus;
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome of a dashboard refresh; each half settles independently.
#[derive(Debug)]
pub struct DashboardRefresh {
    pub today: Result<TodayView>,
    pub score: Result<ProductivityScore>,
}

impl DashboardRefresh {
    pub fn all_ok(&self) -> bool {
        self.today.is_ok() && self.score.is_ok()
    }
}

pub struct Controller {
    api: ApiClient,
    settings: Arc<dyn SettingsStore>,
    renderer: Arc<dyn Renderer>,
    state: Mutex<ViewState>,
}

impl Controller {
    pub fn new(api: ApiClient, renderer: Arc<dyn Renderer>) -> Self {
        let settings = Arc::clone(api.settings());
        Self {
            api,
            settings,
            renderer,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.with_state(|state| state.clone())
    }

    // The lock is never held across an await, so a single response handler
    // always sees and leaves a consistent state.
    fn with_state<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn fail<T>(&self, err: DashError) -> Result<T> {
        self.renderer.notify(&Notification::error(err.to_string()));
        Err(err)
    }

    // ── Goal submission ─────────────────────────────────────────────────

    /// Submit a new goal. On success the returned session becomes current,
    /// plan and monitor report are replaced, and the today view is refreshed.
    pub async fn submit_goal(&self, form: GoalForm) -> Result<GoalResponse> {
        let goal = form.goal.trim();
        if goal.is_empty() {
            return self.fail(DashError::validation("Please enter a goal."));
        }

        let deadline = match non_blank(form.deadline.as_deref()) {
            Some(raw) => match deadline_to_utc(&raw) {
                Ok(utc) => Some(utc),
                Err(err) => return self.fail(err),
            },
            None => None,
        };

        let request = GoalRequest {
            goal: goal.to_string(),
            deadline,
            user_email: non_blank(form.email.as_deref()),
            autonomy_level: non_blank(form.autonomy.as_deref())
                .unwrap_or_else(|| self.settings.autonomy()),
        };

        self.renderer.set_submit_enabled(false);
        let result = self.api.submit_goal(&request).await;
        self.renderer.set_submit_enabled(true);

        let response = match result {
            Ok(response) => response,
            Err(err) => return self.fail(err),
        };

        if let Err(err) = self
            .settings
            .set(SettingKey::CurrentSession, Some(&response.session_id))
        {
            return self.fail(err.into());
        }

        tracing::info!(
            session_id = %response.session_id,
            status = %response.status,
            autonomy = %request.autonomy_level,
            "goal submitted"
        );

        self.with_state(|state| {
            state.plan.clone_from(&response.plan);
            state.monitor_report.clone_from(&response.monitor_report);
            state.last_response = Some(response.clone());
        });
        self.renderer.render(View::GoalResult(&response));
        self.renderer.notify(&goal_notification(&response));

        // Errors here are reported by the refresh itself.
        let _ = self.refresh_today().await;

        Ok(response)
    }

    // ── Approval ────────────────────────────────────────────────────────

    /// Approve the selected pending subtasks of the current session.
    pub async fn approve(&self, selected: &[String]) -> Result<GoalResponse> {
        let Some(session_id) = self.settings.current_session() else {
            return self.fail(DashError::validation(
                "No active session. Submit a goal first.",
            ));
        };

        let approved_task_ids: Vec<String> = selected
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(ToString::to_string)
            .collect();
        if approved_task_ids.is_empty() {
            return self.fail(DashError::validation(
                "Select at least one task to approve.",
            ));
        }

        let request = ApproveRequest {
            session_id,
            approved_task_ids,
        };
        let response = match self.api.approve(&request).await {
            Ok(response) => response,
            Err(err) => return self.fail(err),
        };

        tracing::info!(
            session_id = %request.session_id,
            approved = request.approved_task_ids.len(),
            status = %response.status,
            "actions approved"
        );

        self.with_state(|state| {
            if response.plan.is_some() {
                state.plan.clone_from(&response.plan);
            }
            if response.monitor_report.is_some() {
                state.monitor_report.clone_from(&response.monitor_report);
            }
            state.last_response = Some(response.clone());
        });
        self.renderer.render(View::GoalResult(&response));
        self.renderer.notify(&Notification::success(format!(
            "Approved {} task(s).",
            request.approved_task_ids.len()
        )));

        let _ = self.refresh_dashboard().await;

        Ok(response)
    }

    // ── Today ───────────────────────────────────────────────────────────

    /// Fetch today's plan and events. Both the dashboard summary and the task
    /// list are rendered from this one payload.
    pub async fn refresh_today(&self) -> Result<TodayView> {
        let response = match self.api.today().await {
            Ok(response) => response,
            Err(err) => return self.fail(err),
        };

        let view = TodayView::from_response(response);
        tracing::debug!(
            pending = view.pending_count(),
            done = view.done_count(),
            events = view.events.len(),
            "today refreshed"
        );

        self.with_state(|state| {
            state.plan.clone_from(&view.plan);
            state.today = Some(view.clone());
        });
        self.renderer.render(View::DashboardSummary(&view));
        self.renderer.render(View::TaskList(&view));

        Ok(view)
    }

    /// Mark a task done or pending.
    ///
    /// The toggle never touches local state: on success the whole day is
    /// re-fetched, and that refresh is the only way a completion reaches the
    /// screen.
    pub async fn toggle_task(&self, task_id: &str, done: bool) -> Result<TodayView> {
        let task_id = task_id.trim();
        if task_id.is_empty() {
            return self.fail(DashError::validation("Missing task id."));
        }

        let request = CompleteTaskRequest {
            task_id: task_id.to_string(),
            done,
        };
        if let Err(err) = self.api.complete_task(&request).await {
            return self.fail(err);
        }
        tracing::info!(task_id, done, "task completion updated");

        self.refresh_today().await
    }

    pub async fn load_task_status(&self) -> Result<TaskStatusMap> {
        match self.api.task_status().await {
            Ok(map) => {
                self.renderer.render(View::TaskStatus(&map));
                Ok(map)
            }
            Err(err) => self.fail(err),
        }
    }

    // ── Dashboard ───────────────────────────────────────────────────────

    /// Fetch today and the productivity score concurrently. Each result is
    /// rendered as soon as it settles; one failing does not hold back the
    /// other.
    pub async fn refresh_dashboard(&self) -> DashboardRefresh {
        let (today, score) = tokio::join!(self.refresh_today(), self.load_productivity_score());
        DashboardRefresh { today, score }
    }

    pub async fn load_productivity_score(&self) -> Result<ProductivityScore> {
        let score = match self.api.productivity_score().await {
            Ok(score) => score,
            Err(err) => return self.fail(err),
        };
        self.with_state(|state| state.productivity = Some(score.clone()));
        self.renderer.render(View::DashboardScore(&score));
        Ok(score)
    }

    // ── Weekly review ───────────────────────────────────────────────────

    /// Load the latest weekly review. Any failure, including "none yet",
    /// renders the empty state instead of an error notification.
    pub async fn load_weekly_review(&self) -> Option<WeeklyReview> {
        match self.api.weekly_review().await {
            Ok(review) => {
                self.with_state(|state| state.reflection = Some(review.clone()));
                self.renderer.render(View::WeeklyReview(Some(&review)));
                Some(review)
            }
            Err(err) => {
                tracing::debug!(error = %err, "weekly review unavailable");
                self.with_state(|state| state.reflection = None);
                self.renderer.render(View::WeeklyReview(None));
                None
            }
        }
    }

    // ── Action log ──────────────────────────────────────────────────────

    /// Full snapshot of the action log, rendered most recent first.
    pub async fn load_action_log(&self, session_id: Option<&str>) -> Result<Vec<ActionLogEntry>> {
        let response = match self.api.action_log(session_id).await {
            Ok(response) => response,
            Err(err) => return self.fail(err),
        };

        let mut entries = response.action_log;
        entries.reverse();

        self.with_state(|state| state.action_log = Some(entries.clone()));
        self.renderer.render(View::ActionLog(&entries));
        Ok(entries)
    }

    // ── Sessions / health ───────────────────────────────────────────────

    pub async fn load_sessions(&self) -> Result<Vec<SessionSummary>> {
        match self.api.sessions().await {
            Ok(sessions) => {
                self.renderer.render(View::Sessions(&sessions));
                Ok(sessions)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn check_health(&self) -> Result<HealthResponse> {
        match self.api.health().await {
            Ok(health) => {
                self.renderer.render(View::Health(&health));
                Ok(health)
            }
            Err(err) => self.fail(err),
        }
    }

    // ── Connectivity ────────────────────────────────────────────────────

    /// Re-check backend auth status. Never fails: anything other than an
    /// authenticated answer counts as disconnected.
    pub async fn check_connectivity(&self) -> ConnectionStatus {
        let status = match self.api.auth_status().await {
            Ok(auth) if auth.authenticated => ConnectionStatus::Connected,
            Ok(_) => ConnectionStatus::Disconnected,
            Err(err) => {
                tracing::debug!(error = %err, "connectivity check failed");
                ConnectionStatus::Disconnected
            }
        };

        let previous = self.with_state(|state| std::mem::replace(&mut state.connection, status));
        if previous != status {
            tracing::info!(from = %previous, to = %status, "connection status changed");
        }
        self.renderer.set_connection(status);
        status
    }

    /// Point the user at the backend sign-in page. Disconnected usually
    /// means no calendar credentials yet.
    pub fn show_login(&self) -> String {
        let url = self.api.login_url();
        self.renderer.notify(&Notification::info(format!(
            "Open {url} in a browser to connect your Google account."
        )));
        url
    }

    // ── Settings ────────────────────────────────────────────────────────

    pub fn settings_snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            api_base: self.settings.api_base(),
            autonomy: self.settings.autonomy(),
            current_session: self.settings.current_session(),
        }
    }

    pub fn show_settings(&self) {
        let snapshot = self.settings_snapshot();
        self.renderer.render(View::Settings(&snapshot));
    }

    /// Persist new settings. The backend address must be an http(s) URL;
    /// the autonomy level is passed through as typed.
    pub fn save_settings(&self, api_base: Option<&str>, autonomy: Option<&str>) -> Result<()> {
        let api_base = non_blank(api_base);
        if let Some(raw) = &api_base
            && let Err(err) = validate_api_base(raw)
        {
            return self.fail(err);
        }

        let writes = [
            (SettingKey::ApiBase, api_base),
            (SettingKey::Autonomy, non_blank(autonomy)),
        ];
        for (key, value) in writes {
            if let Some(value) = value
                && let Err(err) = self.settings.set(key, Some(&value))
            {
                return self.fail(err.into());
            }
        }

        self.renderer
            .notify(&Notification::success("Settings saved."));
        self.show_settings();
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        if let Err(err) = self.settings.set(SettingKey::CurrentSession, None) {
            return self.fail(err.into());
        }
        self.renderer
            .notify(&Notification::info("Current session cleared."));
        self.show_settings();
        Ok(())
    }
}

fn validate_api_base(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|err| DashError::validation(format!("Invalid backend URL \"{raw}\": {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DashError::validation(format!(
            "Backend URL must use http or https, not {other}."
        ))),
    }
}

fn goal_notification(response: &GoalResponse) -> Notification {
    if let Some(error) = &response.error {
        return Notification::error(format!("Goal planned with errors: {error}"));
    }
    if response.awaiting_approval() {
        return Notification::info("Plan ready. Approve tasks to schedule them.");
    }
    Notification::success("Goal submitted. Plan created.")
}
