//! Wire types for the planning backend.
//!
//! Only the fields the dashboard renders are modelled; everything else in a
//! payload is ignored. Enum values the client does not know decode to
//! `Unknown` so a new backend value never blanks a whole screen.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Treat an explicit `null` like a missing field. Plans, monitor reports
/// and reviews are model-generated and sometimes carry `null` lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Plan ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub total_estimated_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<Subtask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_type: ActionType,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub scheduled_start: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub depends_on: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TaskStatus,
}

impl Subtask {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    DeepWork,
    Meeting,
    Review,
    Admin,
    Research,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Completion state as reported by the backend. Plans returned from goal
/// submission carry no status at all, which means pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Done,
    #[default]
    #[serde(other)]
    Pending,
}

// ── Monitor / review ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub needs_replan: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overdue_tasks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub at_risk_tasks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_tasks: Vec<String>,
    #[serde(default)]
    pub productivity_score: Option<f64>,
    #[serde(default)]
    pub status_report: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReview {
    #[serde(default)]
    pub week_label: Option<String>,
    #[serde(default)]
    pub productivity_score: Option<f64>,
    #[serde(default)]
    pub completed_tasks: Option<u32>,
    #[serde(default)]
    pub incomplete_tasks: Option<u32>,
    #[serde(default)]
    pub accomplishments: Option<String>,
    #[serde(default)]
    pub insights: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patterns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: TextOrList,
    #[serde(default)]
    pub habit_suggestion: Option<String>,
    #[serde(default)]
    pub next_week_focus: Option<String>,
}

/// A field the backend sends either as one paragraph or as a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl Default for TextOrList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl TextOrList {
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Vec::new(),
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivityScore {
    #[serde(default)]
    pub productivity_score: Option<f64>,
    #[serde(default)]
    pub health: Option<String>,
}

// ── Goal / approval ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRequest {
    pub goal: String,
    pub deadline: Option<String>,
    pub user_email: Option<String>,
    pub autonomy_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproveRequest {
    pub session_id: String,
    pub approved_task_ids: Vec<String>,
}

/// Response of both goal submission and approval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalResponse {
    pub session_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub monitor_report: Option<MonitorReport>,
    #[serde(default)]
    pub pending_approvals: Option<Vec<PendingApproval>>,
    #[serde(default)]
    pub execution_results: Option<Vec<ActionLogEntry>>,
    #[serde(default)]
    pub reflection: Option<WeeklyReview>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GoalResponse {
    pub fn awaiting_approval(&self) -> bool {
        self.pending_approvals
            .as_ref()
            .is_some_and(|pending| !pending.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
}

// ── Today ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodayResponse {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub productivity_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calendar_events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub html_link: Option<String>,
}

/// Timed events carry `dateTime`; all-day events only `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl EventTime {
    pub fn as_str(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteTaskRequest {
    pub task_id: String,
    pub done: bool,
}

/// `task_id → done` for every task that has ever been toggled.
pub type TaskStatusMap = BTreeMap<String, bool>;

// ── Action log ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    /// `None` when the backend did not record an outcome.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub event_link: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLogResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_log: Vec<ActionLogEntry>,
}

// ── Misc ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub autonomy_level: Option<String>,
}
