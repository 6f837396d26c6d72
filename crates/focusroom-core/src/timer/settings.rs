use serde::{Deserialize, Serialize};

use super::mode::Mode;
use super::scheme::Scheme;
use crate::error::ValidationError;

/// Timer settings.
///
/// The four duration/interval fields mirror the active scheme but may be
/// edited independently. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    pub long_break_interval: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
    pub show_rating_modal: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let standard = Scheme::standard();
        Self {
            work_duration: standard.work_duration,
            short_break_duration: standard.short_break_duration,
            long_break_duration: standard.long_break_duration,
            long_break_interval: standard.long_break_interval,
            auto_start_breaks: false,
            auto_start_work: false,
            show_rating_modal: true,
        }
    }
}

impl Settings {
    pub fn duration_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::ShortBreak => self.short_break_duration,
            Mode::LongBreak => self.long_break_duration,
        }
    }

    /// Long-break cadence, clamped to at least one session.
    pub fn effective_long_break_interval(&self) -> u32 {
        self.long_break_interval.max(1)
    }

    /// Copy the scheme's durations and cadence. Auto-start and rating flags
    /// are left alone.
    pub fn apply_scheme(&mut self, scheme: &Scheme) {
        self.work_duration = scheme.work_duration;
        self.short_break_duration = scheme.short_break_duration;
        self.long_break_duration = scheme.long_break_duration;
        self.long_break_interval = scheme.long_break_interval;
    }

    /// Shallow merge: only fields present in the patch change.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.work_duration {
            self.work_duration = v;
        }
        if let Some(v) = patch.short_break_duration {
            self.short_break_duration = v;
        }
        if let Some(v) = patch.long_break_duration {
            self.long_break_duration = v;
        }
        if let Some(v) = patch.long_break_interval {
            self.long_break_interval = v;
        }
        if let Some(v) = patch.auto_start_breaks {
            self.auto_start_breaks = v;
        }
        if let Some(v) = patch.auto_start_work {
            self.auto_start_work = v;
        }
        if let Some(v) = patch.show_rating_modal {
            self.show_rating_modal = v;
        }
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_break_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_break_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_break_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start_breaks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start_work: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_rating_modal: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build a single-field patch from a textual key/value pair.
    ///
    /// Keys match case-insensitively and ignore `-`/`_`, so `workDuration`,
    /// `work-duration` and `work_duration` are the same field.
    pub fn from_key_value(key: &str, value: &str) -> Result<Self, ValidationError> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let mut patch = Self::default();
        match normalized.as_str() {
            "workduration" => patch.work_duration = Some(parse_field(key, value)?),
            "shortbreakduration" => patch.short_break_duration = Some(parse_field(key, value)?),
            "longbreakduration" => patch.long_break_duration = Some(parse_field(key, value)?),
            "longbreakinterval" => patch.long_break_interval = Some(parse_field(key, value)?),
            "autostartbreaks" => patch.auto_start_breaks = Some(parse_field(key, value)?),
            "autostartwork" => patch.auto_start_work = Some(parse_field(key, value)?),
            "showratingmodal" => patch.show_rating_modal = Some(parse_field(key, value)?),
            _ => return Err(ValidationError::UnknownSetting(key.to_string())),
        }
        Ok(patch)
    }
}

fn parse_field<T>(key: &str, value: &str) -> Result<T, ValidationError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ValidationError::InvalidValue {
            field: key.to_string(),
            message: format!("cannot parse '{value}': {e}"),
        })
}
