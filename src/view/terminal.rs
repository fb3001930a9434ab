use super::render::{Notification, NotificationLevel, Renderer, SettingsSnapshot, View};
use super::state::TodayView;
use crate::api::{
    ActionLogEntry, GoalResponse, HealthResponse, MonitorReport, Priority, ProductivityScore,
    SessionSummary, Subtask, TaskStatusMap, WeeklyReview,
};
use crate::nav::Screen;
use crate::poll::ConnectionStatus;
use chrono::{DateTime, Local};
use console::style;
use std::sync::Mutex;

const NEXT_UP_LIMIT: usize = 3;

/// Plain stdout presentation for the CLI and the interactive shell.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    last_connection: Mutex<Option<ConnectionStatus>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, view: View<'_>) {
        for line in lines_for(view) {
            println!("{line}");
        }
    }

    fn notify(&self, notification: &Notification) {
        let marker = match notification.level {
            NotificationLevel::Success => style("✓").green().bold(),
            NotificationLevel::Info => style("•").cyan().bold(),
            NotificationLevel::Error => style("✗").red().bold(),
        };
        eprintln!("{marker} {}", notification.message);
    }

    fn set_header(&self, title: &str, subtitle: &str) {
        println!();
        println!("{}", style(title).white().bold());
        println!("{}", style(subtitle).dim());
    }

    fn set_active_screen(&self, screen: Screen) {
        tracing::debug!(%screen, "screen activated");
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if !enabled {
            println!("{}", style("Planning your goal…").dim());
        }
    }

    fn set_connection(&self, status: ConnectionStatus) {
        let Ok(mut last) = self.last_connection.lock() else {
            return;
        };
        if *last == Some(status) {
            return;
        }
        *last = Some(status);
        let label = match status {
            ConnectionStatus::Connected => style("● connected").green(),
            ConnectionStatus::Disconnected => style("○ disconnected").red(),
        };
        eprintln!("{label}");
    }
}

pub(crate) fn lines_for(view: View<'_>) -> Vec<String> {
    match view {
        View::DashboardSummary(today) => dashboard_summary(today),
        View::DashboardScore(score) => dashboard_score(score),
        View::TaskList(today) => task_list(today),
        View::GoalResult(response) => goal_result(response),
        View::WeeklyReview(Some(review)) => weekly_review(review),
        View::WeeklyReview(None) => vec![
            style("No weekly review yet.").dim().to_string(),
            "Submit a goal and complete some tasks; a review appears after the weekly reflection runs."
                .to_string(),
        ],
        View::ActionLog(entries) => action_log(entries),
        View::Settings(settings) => settings_lines(settings),
        View::Sessions(sessions) => session_lines(sessions),
        View::Health(health) => health_lines(health),
        View::TaskStatus(map) => task_status_lines(map),
    }
}

// ── Dashboard ────────────────────────────────────────────────────────────────

fn dashboard_summary(today: &TodayView) -> Vec<String> {
    let Some(plan) = &today.plan else {
        return vec![style("No plan yet. Submit a goal to get started.").dim().to_string()];
    };

    let mut lines = vec![
        format!("{} {}", style("Goal").cyan(), plan.goal),
        format!(
            "{} pending · {} done · {} total",
            style(today.pending_count()).yellow().bold(),
            style(today.done_count()).green().bold(),
            today.total()
        ),
    ];
    if !today.active.is_empty() {
        lines.push(style("Next up").cyan().to_string());
        for task in today.active.iter().take(NEXT_UP_LIMIT) {
            lines.push(format!("  {} {}", priority_badge(task.priority), task.title));
        }
    }
    lines
}

fn dashboard_score(score: &ProductivityScore) -> Vec<String> {
    let value = score
        .productivity_score
        .map_or_else(|| "—".to_string(), |s| format!("{s:.0}/10"));
    let health = score.health.as_deref().unwrap_or("no_data");
    vec![format!(
        "{} {}  {}",
        style("Productivity").cyan(),
        style(value).bold(),
        health_label(health)
    )]
}

// ── Today ────────────────────────────────────────────────────────────────────

fn task_list(today: &TodayView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(date) = &today.date {
        lines.push(style(date).dim().to_string());
    }

    match &today.plan {
        Some(plan) => {
            lines.push(format!("{} {}", style("Goal").cyan(), plan.goal));
            if let Some(deadline) = &plan.deadline {
                lines.push(format!("{} {}", style("Deadline").cyan(), local_time(deadline)));
            }
            if let Some(hours) = plan.total_estimated_hours {
                lines.push(format!("{} {}", style("Estimated").cyan(), hours_label(hours)));
            }
            lines.push(String::new());
            lines.push(style(format!("Active ({})", today.pending_count())).bold().to_string());
            lines.extend(today.active.iter().map(|t| task_line(t, false)));
            lines.push(style(format!("Completed ({})", today.done_count())).bold().to_string());
            lines.extend(today.completed.iter().map(|t| task_line(t, true)));
        }
        None => lines.push(style("No tasks for today.").dim().to_string()),
    }

    if !today.events.is_empty() {
        lines.push(String::new());
        lines.push(style("Calendar").bold().to_string());
        for event in &today.events {
            let when = event
                .start
                .as_ref()
                .and_then(|s| s.as_str())
                .map_or_else(String::new, local_time);
            lines.push(format!(
                "  {}  {}",
                style(when).dim(),
                event.summary.as_deref().unwrap_or("(untitled)")
            ));
        }
    }
    lines
}

fn task_line(task: &Subtask, done: bool) -> String {
    let check = if done { "[x]" } else { "[ ]" };
    let mut line = format!(
        "  {check} {} {} {}",
        style(&task.id).dim(),
        task.title,
        priority_badge(task.priority)
    );
    if let Some(hours) = task.estimated_hours {
        line.push_str(&format!(" {}", style(hours_label(hours)).dim()));
    }
    if let Some(start) = &task.scheduled_start {
        line.push_str(&format!(" {}", style(local_time(start)).dim()));
    }
    line
}

// ── Goal / approval ──────────────────────────────────────────────────────────

fn goal_result(response: &GoalResponse) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", style("Session").cyan(), response.session_id),
        format!("{} {}", style("Status").cyan(), response.status),
    ];

    if let Some(plan) = &response.plan {
        lines.push(format!("{} {}", style("Goal").cyan(), plan.goal));
        if let Some(notes) = &plan.notes {
            lines.push(style(notes).dim().to_string());
        }
        for task in &plan.subtasks {
            lines.push(format!(
                "  {} {} {} {}",
                style(&task.id).dim(),
                task.title,
                priority_badge(task.priority),
                style(task.action_type).dim()
            ));
        }
    }

    if let Some(pending) = response.pending_approvals.as_deref()
        && !pending.is_empty()
    {
        lines.push(style("Awaiting approval").yellow().bold().to_string());
        for task in pending {
            lines.push(format!("  {} {}", style(&task.id).dim(), task.title));
        }
        lines.push(
            style("Run `focusboard approve <task-id>...` to schedule them.")
                .dim()
                .to_string(),
        );
    }

    if let Some(results) = response.execution_results.as_deref()
        && !results.is_empty()
    {
        lines.push(style("Executed").bold().to_string());
        lines.extend(results.iter().map(action_line));
    }

    if let Some(report) = &response.monitor_report {
        lines.extend(monitor_lines(report));
    }

    if let Some(review) = &response.reflection {
        lines.extend(weekly_review(review));
    }

    if let Some(error) = &response.error {
        lines.push(format!("{} {error}", style("Error").red().bold()));
    }
    lines
}

fn monitor_lines(report: &MonitorReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        style("Health").cyan(),
        health_label(report.health.as_deref().unwrap_or("unknown"))
    )];
    if let Some(summary) = &report.status_report {
        lines.push(summary.clone());
    }
    if !report.overdue_tasks.is_empty() {
        lines.push(format!(
            "{} {}",
            style("Overdue").red(),
            report.overdue_tasks.join(", ")
        ));
    }
    if !report.at_risk_tasks.is_empty() {
        lines.push(format!(
            "{} {}",
            style("At risk").yellow(),
            report.at_risk_tasks.join(", ")
        ));
    }
    lines.extend(
        report
            .recommended_actions
            .iter()
            .map(|a| format!("  → {a}")),
    );
    lines
}

// ── Review / log ─────────────────────────────────────────────────────────────

fn weekly_review(review: &WeeklyReview) -> Vec<String> {
    let mut lines = vec![style(review.week_label.as_deref().unwrap_or("Weekly review"))
        .white()
        .bold()
        .to_string()];
    if let Some(score) = review.productivity_score {
        lines.push(format!("{} {score:.0}/10", style("Score").cyan()));
    }
    lines.push(format!(
        "{} {} completed · {} incomplete",
        style("Tasks").cyan(),
        review.completed_tasks.unwrap_or(0),
        review.incomplete_tasks.unwrap_or(0)
    ));

    let sections = [
        ("Accomplishments", review.accomplishments.as_deref()),
        ("Insights", review.insights.as_deref()),
        ("Habit", review.habit_suggestion.as_deref()),
        ("Next week", review.next_week_focus.as_deref()),
    ];
    for (title, body) in sections {
        if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
            lines.push(style(title).bold().to_string());
            lines.push(body.to_string());
        }
    }

    if !review.patterns.is_empty() {
        lines.push(style("Patterns").bold().to_string());
        lines.extend(review.patterns.iter().map(|p| format!("  • {p}")));
    }
    let recommendations = review.recommendations.items();
    if !recommendations.is_empty() {
        lines.push(style("Recommendations").bold().to_string());
        lines.extend(recommendations.iter().map(|r| format!("  → {r}")));
    }
    lines
}

fn action_log(entries: &[ActionLogEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![style("No actions recorded yet.").dim().to_string()];
    }
    entries.iter().map(action_line).collect()
}

fn action_line(entry: &ActionLogEntry) -> String {
    let marker = match entry.success {
        Some(true) => style("✓").green(),
        Some(false) => style("✗").red(),
        None => style("?").dim(),
    };
    let mut line = format!("{marker} {}", entry.action);
    if let Some(task_id) = &entry.task_id {
        line.push_str(&format!(" {}", style(task_id).dim()));
    }
    if let Some(email) = &entry.email {
        line.push_str(&format!(" → {email}"));
    }
    if let Some(link) = &entry.event_link {
        line.push_str(&format!(" {}", style(link).cyan().underlined()));
    }
    if let Some(error) = &entry.error {
        line.push_str(&format!(" {}", style(error).red()));
    }
    line
}

// ── Settings / misc ──────────────────────────────────────────────────────────

fn settings_lines(settings: &SettingsSnapshot) -> Vec<String> {
    vec![
        format!("{} {}", style("Backend").cyan(), settings.api_base),
        format!("{} {}", style("Autonomy").cyan(), settings.autonomy),
        format!(
            "{} {}",
            style("Session").cyan(),
            settings.current_session.as_deref().unwrap_or("(none)")
        ),
    ]
}

fn session_lines(sessions: &[SessionSummary]) -> Vec<String> {
    if sessions.is_empty() {
        return vec![style("No sessions yet.").dim().to_string()];
    }
    sessions
        .iter()
        .map(|s| {
            format!(
                "{}  {}  {}",
                s.session_id,
                style(s.status.as_deref().unwrap_or("unknown")).dim(),
                s.goal.as_deref().unwrap_or("")
            )
        })
        .collect()
}

fn health_lines(health: &HealthResponse) -> Vec<String> {
    let mut lines = vec![format!("{} {}", style("Backend").cyan(), health.status)];
    if let Some(version) = &health.version {
        lines.push(format!("{} {version}", style("Version").cyan()));
    }
    if let Some(level) = &health.autonomy_level {
        lines.push(format!("{} {level}", style("Autonomy").cyan()));
    }
    if let Some(ts) = &health.timestamp {
        lines.push(style(local_time(ts)).dim().to_string());
    }
    lines
}

fn task_status_lines(map: &TaskStatusMap) -> Vec<String> {
    if map.is_empty() {
        return vec![style("No task has been toggled yet.").dim().to_string()];
    }
    map.iter()
        .map(|(id, done)| format!("{id}  {}", if *done { "done" } else { "pending" }))
        .collect()
}

// ── Formatting helpers ───────────────────────────────────────────────────────

fn priority_badge(priority: Priority) -> String {
    match priority {
        Priority::High => style("high").red().to_string(),
        Priority::Medium => style("medium").yellow().to_string(),
        Priority::Low => style("low").green().to_string(),
        Priority::Unknown => String::new(),
    }
}

fn health_label(health: &str) -> String {
    let label = health.replace('_', " ");
    match health {
        "on_track" => style(label).green().to_string(),
        "at_risk" => style(label).yellow().to_string(),
        "off_track" => style(label).red().to_string(),
        _ => style(label).dim().to_string(),
    }
}

fn hours_label(hours: f64) -> String {
    format!("{hours:.1}h")
}

/// Render a backend timestamp in local time; unparsable values pass through.
fn local_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |at| at.with_timezone(&Local).format("%a %b %-d %H:%M").to_string(),
    )
}
