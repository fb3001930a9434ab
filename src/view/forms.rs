use crate::error::{DashError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Raw input of the goal form, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub goal: String,
    /// Local wall-clock time, e.g. `2025-02-28T17:00`.
    pub deadline: Option<String>,
    pub email: Option<String>,
    /// Falls back to the persisted `autonomy` setting.
    pub autonomy: Option<String>,
}

impl GoalForm {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Self::default()
        }
    }
}

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Convert a local deadline to a UTC timestamp in the system timezone.
pub fn deadline_to_utc(raw: &str) -> Result<String> {
    deadline_to_utc_in(raw, &Local)
}

/// Convert a deadline typed in `tz` to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Accepts an explicit RFC 3339 timestamp, a local date-time, or a bare date
/// (which means the end of that day).
pub fn deadline_to_utc_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<String> {
    let raw = raw.trim();

    if let Ok(explicit) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format_utc(&explicit.with_timezone(&Utc)));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| NaiveTime::from_hms_opt(23, 59, 0).map(|t| date.and_time(t)))
        })
        .ok_or_else(|| {
            DashError::validation(format!(
                "Could not read deadline \"{raw}\". Use YYYY-MM-DD HH:MM."
            ))
        })?;

    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        DashError::validation(format!("Deadline {raw} does not exist in the local timezone."))
    })?;

    Ok(format_utc(&local.with_timezone(&Utc)))
}

fn format_utc(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Trim optional text input; blank means absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
