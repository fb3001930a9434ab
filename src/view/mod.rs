pub mod controller;
pub mod forms;
pub mod render;
pub mod state;
pub mod terminal;

pub use controller::{Controller, DashboardRefresh};
pub use forms::{GoalForm, deadline_to_utc, deadline_to_utc_in};
pub use render::{Notification, NotificationLevel, Renderer, SettingsSnapshot, View};
pub use state::{TodayView, ViewState};
pub use terminal::TerminalRenderer;
