use super::{SettingKey, SettingsStore};
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autonomy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_session: Option<String>,
}

impl SettingsFile {
    fn slot(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::ApiBase => &mut self.api_base,
            SettingKey::Autonomy => &mut self.autonomy,
            SettingKey::CurrentSession => &mut self.current_session,
        }
    }

    fn value(&self, key: SettingKey) -> Option<&String> {
        match key {
            SettingKey::ApiBase => self.api_base.as_ref(),
            SettingKey::Autonomy => self.autonomy.as_ref(),
            SettingKey::CurrentSession => self.current_session.as_ref(),
        }
        .filter(|v| !v.is_empty())
    }
}

/// Settings persisted as TOML, rewritten on every `set`.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: RwLock<SettingsFile>,
}

impl FileSettingsStore {
    /// Open `~/.focusboard/settings.toml` (or `$FOCUSBOARD_HOME/settings.toml`),
    /// creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self, SettingsError> {
        let dir = super::env_overrides::settings_dir()?;
        Self::open(dir.join(SETTINGS_FILE))
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            let values = SettingsFile::default();
            persist(&path, &values)?;
            tracing::info!(path = %path.display(), "created settings file");
            values
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self, key: SettingKey) -> Option<String> {
        self.values.read().ok()?.value(key).cloned()
    }

    fn write(&self, key: SettingKey, value: Option<String>) -> Result<(), SettingsError> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        let mut next = values.clone();
        *next.slot(key) = value;
        // Disk first: a failed write leaves the in-memory copy untouched.
        persist(&self.path, &next)?;
        *values = next;
        Ok(())
    }
}

fn persist(path: &Path, values: &SettingsFile) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(values)?;
    fs::write(path, toml_str)?;
    Ok(())
}
