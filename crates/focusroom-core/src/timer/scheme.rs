use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::error::ValidationError;

pub const STANDARD_SCHEME_ID: &str = "standard";
pub const LONG_SCHEME_ID: &str = "long";

/// A named preset of interval durations and long-break cadence.
///
/// Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: String,
    pub name: String,
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    /// Work sessions between long breaks.
    pub long_break_interval: u32,
}

/// A scheme before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDraft {
    pub name: String,
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    pub long_break_interval: u32,
}

impl SchemeDraft {
    /// Reject drafts a user almost certainly did not mean: zero-length
    /// intervals, a zero cadence or a blank name. The state machine itself
    /// accepts any draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field: &str, message: &str| ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be blank"));
        }
        for (field, secs) in [
            ("workDuration", self.work_duration),
            ("shortBreakDuration", self.short_break_duration),
            ("longBreakDuration", self.long_break_duration),
        ] {
            if secs == 0 {
                return Err(invalid(field, "must be at least one second"));
            }
        }
        if self.long_break_interval == 0 {
            return Err(invalid("longBreakInterval", "must be at least 1"));
        }
        Ok(())
    }
}

impl Scheme {
    /// Classic 25/5/15 pomodoro with a long break every fourth session.
    pub fn standard() -> Self {
        Self {
            id: STANDARD_SCHEME_ID.into(),
            name: "Standard Pomodoro".into(),
            work_duration: 25 * 60,
            short_break_duration: 5 * 60,
            long_break_duration: 15 * 60,
            long_break_interval: 4,
        }
    }

    /// 50/10/30 deep-focus preset with a long break every second session.
    pub fn long() -> Self {
        Self {
            id: LONG_SCHEME_ID.into(),
            name: "Deep Focus".into(),
            work_duration: 50 * 60,
            short_break_duration: 10 * 60,
            long_break_duration: 30 * 60,
            long_break_interval: 2,
        }
    }

    pub fn builtins() -> Vec<Scheme> {
        vec![Self::standard(), Self::long()]
    }

    /// Built-in schemes can be neither deleted nor edited.
    pub fn is_builtin_id(id: &str) -> bool {
        id == STANDARD_SCHEME_ID || id == LONG_SCHEME_ID
    }

    pub fn is_builtin(&self) -> bool {
        Self::is_builtin_id(&self.id)
    }

    pub fn from_draft(id: String, draft: SchemeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            work_duration: draft.work_duration,
            short_break_duration: draft.short_break_duration,
            long_break_duration: draft.long_break_duration,
            long_break_interval: draft.long_break_interval,
        }
    }

    pub fn duration_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::ShortBreak => self.short_break_duration,
            Mode::LongBreak => self.long_break_duration,
        }
    }

    /// Length of one full cycle in seconds: every work session, the short
    /// breaks in between, and the closing long break.
    pub fn cycle_secs(&self) -> u64 {
        let sessions = u64::from(self.long_break_interval.max(1));
        let work = self.work_duration.saturating_mul(sessions);
        let short = self.short_break_duration.saturating_mul(sessions - 1);
        work.saturating_add(short)
            .saturating_add(self.long_break_duration)
    }
}
