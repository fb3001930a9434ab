use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `focusboard`.
///
/// Every controller operation returns one of these. The controller boundary
/// converts them into notifications; library callers can match on the
/// variant to tell a local precondition apart from a backend failure.
#[derive(Debug, Error)]
pub enum DashError {
    // ── Local precondition (network never contacted) ────────────────────
    #[error("{0}")]
    Validation(String),

    // ── Non-success status or transport failure ─────────────────────────
    #[error("{message}")]
    Request {
        status: Option<u16>,
        message: String,
    },

    // ── Body was not the JSON we expected ───────────────────────────────
    #[error("could not decode response: {0}")]
    Decode(String),

    // ── Persisted settings ──────────────────────────────────────────────
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
}

impl DashError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status of a failed request, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ─── Settings errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not find home directory")]
    NoHome,

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings store lock poisoned")]
    Poisoned,
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
