#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod nav;
pub mod poll;
pub mod view;

pub use api::ApiClient;
pub use config::{FileSettingsStore, MemorySettingsStore, SettingKey, SettingsStore};
pub use error::{DashError, SettingsError};
pub use view::{Controller, Renderer, TerminalRenderer};
