use crate::api::{
    ActionLogEntry, CalendarEvent, GoalResponse, MonitorReport, Plan, ProductivityScore, Subtask,
    TodayResponse, WeeklyReview,
};
use crate::poll::ConnectionStatus;

/// Last-known backend snapshot, one slot per screen.
///
/// Slots are only ever replaced wholesale from a response; nothing here is
/// edited in place.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub plan: Option<Plan>,
    pub monitor_report: Option<MonitorReport>,
    /// Latest goal submission or approval response.
    pub last_response: Option<GoalResponse>,
    pub today: Option<TodayView>,
    pub productivity: Option<ProductivityScore>,
    pub reflection: Option<WeeklyReview>,
    /// Most recent entry first.
    pub action_log: Option<Vec<ActionLogEntry>>,
    pub connection: ConnectionStatus,
}

/// One `/today` payload with its subtasks split by completion.
///
/// `active` and `completed` are disjoint and together hold every subtask of
/// the plan, in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodayView {
    pub date: Option<String>,
    pub plan: Option<Plan>,
    pub active: Vec<Subtask>,
    pub completed: Vec<Subtask>,
    pub events: Vec<CalendarEvent>,
    pub productivity_score: Option<f64>,
}

impl TodayView {
    pub fn from_response(response: TodayResponse) -> Self {
        let (completed, active): (Vec<Subtask>, Vec<Subtask>) = response
            .plan
            .as_ref()
            .map(|plan| plan.subtasks.iter().cloned().partition(Subtask::is_done))
            .unwrap_or_default();

        Self {
            date: response.date,
            plan: response.plan,
            active,
            completed,
            events: response.calendar_events,
            productivity_score: response.productivity_score,
        }
    }

    pub fn total(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    pub fn pending_count(&self) -> usize {
        self.active.len()
    }

    pub fn done_count(&self) -> usize {
        self.completed.len()
    }

    pub fn active_ids(&self) -> Vec<&str> {
        self.active.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn completed_ids(&self) -> Vec<&str> {
        self.completed.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn find(&self, task_id: &str) -> Option<&Subtask> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .find(|t| t.id == task_id)
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }
}
