//! Single-active-screen navigation.

use crate::view::Controller;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Screen {
    #[default]
    Dashboard,
    Goal,
    Today,
    Review,
    Log,
    Settings,
}

impl Screen {
    /// Page header and subtitle shown while this screen is active.
    pub fn header(self) -> (&'static str, &'static str) {
        match self {
            Self::Dashboard => ("Dashboard", "Your productivity at a glance"),
            Self::Goal => ("New Goal", "Describe what you want to achieve"),
            Self::Today => ("Today", "Tasks and calendar for today"),
            Self::Review => ("Weekly Review", "Reflection on the past week"),
            Self::Log => ("Action Log", "Everything the agents did, newest first"),
            Self::Settings => ("Settings", "Backend address and defaults"),
        }
    }

    /// Screens whose content comes from the backend and is re-fetched on
    /// every activation.
    pub fn is_server_backed(self) -> bool {
        matches!(self, Self::Today | Self::Review | Self::Log)
    }
}

/// Tracks the one active screen. Nothing is cached between activations.
#[derive(Debug, Default)]
pub struct Navigator {
    active: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_active(&self, screen: Screen) -> bool {
        self.active == screen
    }

    /// Make `screen` the only active screen, update the header, and refresh
    /// it if its content is server-backed.
    pub async fn activate(&mut self, screen: Screen, controller: &Controller) {
        self.active = screen;

        let renderer = controller.renderer();
        renderer.set_active_screen(screen);
        let (title, subtitle) = screen.header();
        renderer.set_header(title, subtitle);

        match screen {
            Screen::Today => {
                let _ = controller.refresh_today().await;
            }
            Screen::Review => {
                controller.load_weekly_review().await;
            }
            Screen::Log => {
                let _ = controller.load_action_log(None).await;
            }
            Screen::Settings => controller.show_settings(),
            Screen::Dashboard | Screen::Goal => {}
        }
    }
}
