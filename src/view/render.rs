use super::state::TodayView;
use crate::api::{
    ActionLogEntry, GoalResponse, HealthResponse, ProductivityScore, SessionSummary,
    TaskStatusMap, WeeklyReview,
};
use crate::nav::Screen;
use crate::poll::ConnectionStatus;

/// Something the presentation layer can draw.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    /// Compact counts and next tasks for the dashboard.
    DashboardSummary(&'a TodayView),
    DashboardScore(&'a ProductivityScore),
    /// Full task list screen, fed by the same payload as the summary.
    TaskList(&'a TodayView),
    GoalResult(&'a GoalResponse),
    /// `None` is the "no review yet" empty state.
    WeeklyReview(Option<&'a WeeklyReview>),
    ActionLog(&'a [ActionLogEntry]),
    Settings(&'a SettingsSnapshot),
    Sessions(&'a [SessionSummary]),
    Health(&'a HealthResponse),
    TaskStatus(&'a TaskStatusMap),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub api_base: String,
    pub autonomy: String,
    pub current_session: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// Transient toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Presentation layer. Controllers call this after every state change; the
/// implementation owns all markup, styling and copy.
pub trait Renderer: Send + Sync {
    fn render(&self, view: View<'_>);

    fn notify(&self, notification: &Notification);

    fn set_header(&self, _title: &str, _subtitle: &str) {}

    fn set_active_screen(&self, _screen: Screen) {}

    /// Goal form submit button; disabled while a submission is in flight.
    fn set_submit_enabled(&self, _enabled: bool) {}

    fn set_connection(&self, _status: ConnectionStatus) {}
}
