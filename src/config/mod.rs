//! Persisted client settings.
//!
//! Three keys survive restarts: the backend address, the default autonomy
//! level sent with new goals, and the id of the session created by the most
//! recent goal submission. Everything else the client shows is fetched fresh.

mod env_overrides;
mod file_store;

use crate::error::SettingsError;
use std::collections::HashMap;
use std::sync::Mutex;

pub use file_store::FileSettingsStore;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_AUTONOMY: &str = "autonomous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SettingKey {
    #[strum(serialize = "apiBase")]
    ApiBase,
    #[strum(serialize = "autonomy")]
    Autonomy,
    #[strum(serialize = "currentSession")]
    CurrentSession,
}

impl SettingKey {
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            Self::ApiBase => Some(DEFAULT_API_BASE),
            Self::Autonomy => Some(DEFAULT_AUTONOMY),
            Self::CurrentSession => None,
        }
    }
}

/// Durable key/value storage for client settings.
///
/// Implementors only provide raw reads and writes; defaults and value
/// normalization live in the provided methods so every store behaves the
/// same way.
pub trait SettingsStore: Send + Sync {
    /// Last written value, without defaults applied.
    fn read(&self, key: SettingKey) -> Option<String>;

    /// Persist `value` (or remove the key when `None`) before returning.
    fn write(&self, key: SettingKey, value: Option<String>) -> Result<(), SettingsError>;

    fn get(&self, key: SettingKey) -> Option<String> {
        self.read(key)
            .or_else(|| key.default_value().map(ToString::to_string))
    }

    fn set(&self, key: SettingKey, value: Option<&str>) -> Result<(), SettingsError> {
        let value = value.map(|v| match key {
            SettingKey::ApiBase => normalize_api_base(v),
            _ => v.to_string(),
        });
        tracing::debug!(key = %key, cleared = value.is_none(), "setting written");
        self.write(key, value)
    }

    fn api_base(&self) -> String {
        self.get(SettingKey::ApiBase)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    fn autonomy(&self) -> String {
        self.get(SettingKey::Autonomy)
            .unwrap_or_else(|| DEFAULT_AUTONOMY.to_string())
    }

    fn current_session(&self) -> Option<String> {
        self.get(SettingKey::CurrentSession)
            .filter(|id| !id.is_empty())
    }
}

pub(crate) fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Non-durable store, used when no settings file is wanted.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<SettingKey, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base(api_base: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(SettingKey::ApiBase, normalize_api_base(api_base));
        }
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read(&self, key: SettingKey) -> Option<String> {
        self.values.lock().ok()?.get(&key).cloned()
    }

    fn write(&self, key: SettingKey, value: Option<String>) -> Result<(), SettingsError> {
        let mut values = self.values.lock().map_err(|_| SettingsError::Poisoned)?;
        match value {
            Some(value) => values.insert(key, value),
            None => values.remove(&key),
        };
        Ok(())
    }
}
