use crate::error::SettingsError;
use directories::UserDirs;
use std::path::PathBuf;

const HOME_ENV: &str = "FOCUSBOARD_HOME";

pub(super) fn settings_dir() -> Result<PathBuf, SettingsError> {
    let home = UserDirs::new().map(|u| u.home_dir().to_path_buf());
    resolve_settings_dir(std::env::var(HOME_ENV).ok(), home)
}

fn resolve_settings_dir(
    override_dir: Option<String>,
    home: Option<PathBuf>,
) -> Result<PathBuf, SettingsError> {
    if let Some(dir) = override_dir
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    home.map(|h| h.join(".focusboard"))
        .ok_or(SettingsError::NoHome)
}
