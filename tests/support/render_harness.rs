use focusboard::api::{
    ActionLogEntry, GoalResponse, HealthResponse, ProductivityScore, SessionSummary,
    TaskStatusMap, WeeklyReview,
};
use focusboard::nav::Screen;
use focusboard::poll::ConnectionStatus;
use focusboard::view::{
    Notification, NotificationLevel, Renderer, SettingsSnapshot, TodayView, View,
};
use focusboard::{ApiClient, Controller, MemorySettingsStore, SettingsStore};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Owned copy of everything the controller asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    DashboardSummary(TodayView),
    DashboardScore(ProductivityScore),
    TaskList(TodayView),
    GoalResult(GoalResponse),
    WeeklyReview(Option<WeeklyReview>),
    ActionLog(Vec<ActionLogEntry>),
    Settings(SettingsSnapshot),
    Sessions(Vec<SessionSummary>),
    Health(HealthResponse),
    TaskStatus(TaskStatusMap),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Render(Rendered),
    Notify(Notification),
    Header(String, String),
    Screen(Screen),
    SubmitEnabled(bool),
    Connection(ConnectionStatus),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<Event>>,
}

impl RecordingRenderer {
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn rendered(&self) -> Vec<Rendered> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Render(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, view: View<'_>) {
        let rendered = match view {
            View::DashboardSummary(t) => Rendered::DashboardSummary(t.clone()),
            View::DashboardScore(s) => Rendered::DashboardScore(s.clone()),
            View::TaskList(t) => Rendered::TaskList(t.clone()),
            View::GoalResult(r) => Rendered::GoalResult(r.clone()),
            View::WeeklyReview(r) => Rendered::WeeklyReview(r.cloned()),
            View::ActionLog(e) => Rendered::ActionLog(e.to_vec()),
            View::Settings(s) => Rendered::Settings(s.clone()),
            View::Sessions(s) => Rendered::Sessions(s.to_vec()),
            View::Health(h) => Rendered::Health(h.clone()),
            View::TaskStatus(m) => Rendered::TaskStatus(m.clone()),
        };
        self.push(Event::Render(rendered));
    }

    fn notify(&self, notification: &Notification) {
        self.push(Event::Notify(notification.clone()));
    }

    fn set_header(&self, title: &str, subtitle: &str) {
        self.push(Event::Header(title.to_string(), subtitle.to_string()));
    }

    fn set_active_screen(&self, screen: Screen) {
        self.push(Event::Screen(screen));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.push(Event::SubmitEnabled(enabled));
    }

    fn set_connection(&self, status: ConnectionStatus) {
        self.push(Event::Connection(status));
    }
}

pub struct Harness {
    pub controller: Arc<Controller>,
    pub renderer: Arc<RecordingRenderer>,
    pub settings: Arc<MemorySettingsStore>,
}

impl Harness {
    pub fn against(api_base: &str) -> Self {
        let settings = Arc::new(MemorySettingsStore::with_api_base(api_base));
        let renderer = Arc::new(RecordingRenderer::default());
        let store: Arc<dyn SettingsStore> = settings.clone();
        let controller = Arc::new(Controller::new(ApiClient::new(store), renderer.clone()));
        Self {
            controller,
            renderer,
            settings,
        }
    }

    pub fn new(server: &MockServer) -> Self {
        Self::against(&server.uri())
    }
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("mock server should record received requests")
        .len()
}
