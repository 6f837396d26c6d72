//! Session state machine.
//!
//! The machine has no internal clock. A driver calls `Command::Tick` once per
//! second of planned time while the timer runs; everything else is a user
//! intent. Each command is applied under exclusive access and returns the
//! side effects the caller should perform.
//!
//! ## Mode cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//!                       (long break every `longBreakInterval` work sessions)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut state = FocusState::default();
//! state.apply(Command::ToggleTimer, &Stamp::now());
//! // once per second:
//! let effects = state.apply(Command::Tick, &Stamp::now());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use super::history::{Rating, SessionRecord};
use super::mode::Mode;
use super::scheme::{Scheme, SchemeDraft, STANDARD_SCHEME_ID};
use super::settings::{Settings, SettingsPatch};
use crate::events::{Effect, Notification};
use crate::preferences::{CustomSound, Preferences};

/// Every mutation the state machine accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Tick,
    ToggleTimer,
    ResetTimer,
    SetMode { mode: Mode },
    CompleteSession { rating: Option<Rating> },
    ResetCycle,
    AddScheme { scheme: SchemeDraft },
    DeleteScheme { id: String },
    SetActiveScheme { id: String },
    UpdateSettings { patch: SettingsPatch },
    RateLastSession { rating: Rating },
    SetTheme { theme: String },
    ToggleImmersive,
    SetAmbientSound { sound: Option<String> },
    SetCustomSound { url: Option<String>, name: Option<String> },
    SetVolume { volume: f64 },
    SetCurrentTask { task: String },
}

/// Identity and instant handed to a transition, so transitions stay
/// deterministic. The id is used when the command creates a history record
/// or a scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: String,
    pub at: DateTime<Utc>,
}

impl Stamp {
    pub fn new(id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { id: id.into(), at }
    }

    pub fn now() -> Self {
        Self::new(Uuid::new_v4().to_string(), Utc::now())
    }
}

/// Read-only view of the runtime timer for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatus {
    pub mode: Mode,
    pub time_left: u64,
    pub total: u64,
    /// 0.0 .. 1.0 progress within the current interval.
    pub progress: f64,
    pub is_running: bool,
    pub sessions_completed: u32,
    /// Mode the machine moves to when the current interval completes.
    pub next_mode: Mode,
    pub active_scheme_id: String,
}

/// The whole persisted application state.
///
/// Fields are private: the only way to change them is [`FocusState::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusState {
    time_left: u64,
    is_running: bool,
    mode: Mode,
    sessions_completed: u32,
    settings: Settings,
    /// Most recent first.
    history: VecDeque<SessionRecord>,
    schemes: Vec<Scheme>,
    active_scheme_id: String,
    #[serde(flatten)]
    preferences: Preferences,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl FocusState {
    /// Fresh state in Work mode, not running, with a full work interval.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            time_left: settings.work_duration,
            is_running: false,
            mode: Mode::Work,
            sessions_completed: 0,
            settings,
            history: VecDeque::new(),
            schemes: Scheme::builtins(),
            active_scheme_id: STANDARD_SCHEME_ID.into(),
            preferences: Preferences::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &VecDeque<SessionRecord> {
        &self.history
    }

    pub fn last_session(&self) -> Option<&SessionRecord> {
        self.history.front()
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn active_scheme_id(&self) -> &str {
        &self.active_scheme_id
    }

    pub fn active_scheme(&self) -> Option<&Scheme> {
        self.find_scheme(&self.active_scheme_id)
    }

    pub fn find_scheme(&self, id: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Configured length of the current interval.
    pub fn current_duration(&self) -> u64 {
        self.settings.duration_for(self.mode)
    }

    /// Mode and session count that completing the current interval yields.
    pub fn upcoming(&self) -> (Mode, u32) {
        match self.mode {
            Mode::Work => {
                let completed = self.sessions_completed.saturating_add(1);
                let interval = self.settings.effective_long_break_interval();
                let next = if completed % interval == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
                (next, completed)
            }
            Mode::ShortBreak | Mode::LongBreak => (Mode::Work, self.sessions_completed),
        }
    }

    /// The just-finished work record, when a UI should prompt for a rating:
    /// prompting is enabled, a break is underway and the record is unrated.
    pub fn pending_rating(&self) -> Option<&SessionRecord> {
        if !self.settings.show_rating_modal || !self.mode.is_break() {
            return None;
        }
        self.history.front().filter(|r| r.accepts_rating())
    }

    pub fn status(&self) -> TimerStatus {
        let total = self.current_duration();
        let progress = if total == 0 {
            0.0
        } else {
            (1.0 - self.time_left as f64 / total as f64).clamp(0.0, 1.0)
        };
        TimerStatus {
            mode: self.mode,
            time_left: self.time_left,
            total,
            progress,
            is_running: self.is_running,
            sessions_completed: self.sessions_completed,
            next_mode: self.upcoming().0,
            active_scheme_id: self.active_scheme_id.clone(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply one command. Returns the effects to execute; an empty list
    /// means the command was a no-op and nothing needs persisting.
    pub fn apply(&mut self, command: Command, stamp: &Stamp) -> Vec<Effect> {
        match command {
            Command::Tick => self.tick(stamp),
            Command::ToggleTimer => {
                self.is_running = !self.is_running;
                changed()
            }
            Command::ResetTimer => {
                self.time_left = self.current_duration();
                self.is_running = false;
                changed()
            }
            Command::SetMode { mode } => {
                self.mode = mode;
                self.time_left = self.settings.duration_for(mode);
                self.is_running = false;
                changed()
            }
            Command::CompleteSession { rating } => self.complete_session(rating, stamp),
            Command::ResetCycle => {
                self.sessions_completed = 0;
                self.mode = Mode::Work;
                self.time_left = self.settings.work_duration;
                self.is_running = false;
                changed()
            }
            Command::AddScheme { scheme } => self.add_scheme(scheme, stamp),
            Command::DeleteScheme { id } => self.delete_scheme(&id),
            Command::SetActiveScheme { id } => self.set_active_scheme(&id),
            Command::UpdateSettings { patch } => {
                if patch.is_empty() {
                    return unchanged();
                }
                // A running countdown keeps its remaining time; new durations
                // take effect at the next transition or reset.
                self.settings.apply_patch(&patch);
                changed()
            }
            Command::RateLastSession { rating } => self.rate_last_session(rating),
            Command::SetTheme { theme } => {
                self.preferences.theme = theme;
                changed()
            }
            Command::ToggleImmersive => {
                self.preferences.is_immersive = !self.preferences.is_immersive;
                changed()
            }
            Command::SetAmbientSound { sound } => {
                self.preferences.ambient_sound = sound;
                changed()
            }
            Command::SetCustomSound { url, name } => {
                self.preferences.custom_sound = CustomSound { url, name };
                changed()
            }
            Command::SetVolume { volume } => {
                if self.preferences.set_volume(volume) {
                    changed()
                } else {
                    tracing::debug!(volume, "ignoring non-finite volume");
                    unchanged()
                }
            }
            Command::SetCurrentTask { task } => {
                self.preferences.current_task = task;
                changed()
            }
        }
    }

    /// Restore invariants a hand-edited or older snapshot may violate:
    /// built-in schemes present, active scheme id resolvable.
    /// Returns true if anything was repaired.
    pub fn normalize(&mut self) -> bool {
        let mut repaired = false;
        for builtin in Scheme::builtins().into_iter().rev() {
            if self.find_scheme(&builtin.id).is_none() {
                self.schemes.insert(0, builtin);
                repaired = true;
            }
        }
        if self.active_scheme().is_none() {
            self.active_scheme_id = STANDARD_SCHEME_ID.into();
            repaired = true;
        }
        repaired
    }

    fn tick(&mut self, stamp: &Stamp) -> Vec<Effect> {
        if !self.is_running {
            return unchanged();
        }
        if self.time_left > 0 {
            self.time_left -= 1;
            return changed();
        }
        self.complete_session(None, stamp)
    }

    fn complete_session(&mut self, rating: Option<Rating>, stamp: &Stamp) -> Vec<Effect> {
        let finished = self.mode;
        let is_work = finished == Mode::Work;
        let record = SessionRecord {
            id: stamp.id.clone(),
            mode: finished,
            duration: self.current_duration(),
            timestamp: stamp.at,
            task_name: if is_work { self.preferences.task_name() } else { None },
            rating: if is_work { rating } else { None },
        };
        let (next_mode, sessions_completed) = self.upcoming();

        self.history.push_front(record);
        self.sessions_completed = sessions_completed;
        self.mode = next_mode;
        self.time_left = self.settings.duration_for(next_mode);
        self.is_running = if is_work {
            self.settings.auto_start_breaks
        } else {
            self.settings.auto_start_work
        };

        tracing::debug!(
            finished = %finished,
            next = %next_mode,
            sessions_completed,
            "session completed"
        );
        vec![
            Effect::Persist,
            Effect::Notify(Notification::session_completed(finished)),
        ]
    }

    fn add_scheme(&mut self, draft: SchemeDraft, stamp: &Stamp) -> Vec<Effect> {
        if self.find_scheme(&stamp.id).is_some() {
            tracing::warn!(id = %stamp.id, "scheme id already taken, not adding");
            return unchanged();
        }
        self.schemes.push(Scheme::from_draft(stamp.id.clone(), draft));
        changed()
    }

    /// Deleting the active scheme activates `standard`, which also resets
    /// `time_left` and pauses a running countdown.
    fn delete_scheme(&mut self, id: &str) -> Vec<Effect> {
        if Scheme::is_builtin_id(id) {
            tracing::warn!(id, "refusing to delete built-in scheme");
            return unchanged();
        }
        let before = self.schemes.len();
        self.schemes.retain(|s| s.id != id);
        if self.schemes.len() == before {
            tracing::debug!(id, "delete of unknown scheme ignored");
            return unchanged();
        }
        if self.active_scheme_id == id {
            self.set_active_scheme(STANDARD_SCHEME_ID);
        }
        changed()
    }

    fn set_active_scheme(&mut self, id: &str) -> Vec<Effect> {
        let scheme = match self.find_scheme(id) {
            Some(scheme) => scheme.clone(),
            None => {
                tracing::warn!(id, "unknown scheme, falling back to standard");
                self.find_scheme(STANDARD_SCHEME_ID)
                    .cloned()
                    .unwrap_or_else(Scheme::standard)
            }
        };
        self.active_scheme_id = scheme.id.clone();
        self.settings.apply_scheme(&scheme);
        self.time_left = self.current_duration();
        self.is_running = false;
        changed()
    }

    fn rate_last_session(&mut self, rating: Rating) -> Vec<Effect> {
        match self.history.front_mut() {
            Some(record) if record.accepts_rating() => {
                record.rating = Some(rating);
                changed()
            }
            _ => {
                tracing::debug!("no unrated work session to rate");
                unchanged()
            }
        }
    }
}

fn changed() -> Vec<Effect> {
    vec![Effect::Persist]
}

fn unchanged() -> Vec<Effect> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(id: &str) -> Stamp {
        Stamp::new(id, Utc::now())
    }

    fn short_settings() -> Settings {
        Settings {
            work_duration: 3,
            short_break_duration: 2,
            long_break_duration: 4,
            long_break_interval: 2,
            ..Settings::default()
        }
    }

    #[test]
    fn initial_state() {
        let state = FocusState::default();
        assert_eq!(state.mode(), Mode::Work);
        assert!(!state.is_running());
        assert_eq!(state.time_left(), 1500);
        assert_eq!(state.sessions_completed(), 0);
        assert_eq!(state.active_scheme_id(), "standard");
        assert_eq!(state.schemes().len(), 2);
        assert!(state.history().is_empty());
    }

    #[test]
    fn tick_is_noop_when_paused() {
        let mut state = FocusState::default();
        let effects = state.apply(Command::Tick, &stamp("t"));
        assert!(effects.is_empty());
        assert_eq!(state.time_left(), 1500);
    }

    #[test]
    fn tick_decrements_then_completes() {
        let mut state = FocusState::with_settings(short_settings());
        state.apply(Command::ToggleTimer, &stamp("t"));
        for expected in [2, 1, 0] {
            assert_eq!(state.apply(Command::Tick, &stamp("t")), vec![Effect::Persist]);
            assert_eq!(state.time_left(), expected);
        }
        let effects = state.apply(Command::Tick, &stamp("rec-1"));
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[1], Effect::Notify(_)));
        assert_eq!(state.mode(), Mode::ShortBreak);
        assert_eq!(state.time_left(), 2);
        assert_eq!(state.history()[0].id, "rec-1");
        assert!(!state.is_running());
    }

    #[test]
    fn toggle_has_no_guard() {
        let mut state = FocusState::with_settings(Settings {
            work_duration: 0,
            ..Settings::default()
        });
        state.apply(Command::ToggleTimer, &stamp("t"));
        assert!(state.is_running());
        state.apply(Command::ToggleTimer, &stamp("t"));
        assert!(!state.is_running());
    }

    #[test]
    fn reset_timer_keeps_mode_and_count() {
        let mut state = FocusState::with_settings(short_settings());
        state.apply(Command::CompleteSession { rating: None }, &stamp("a"));
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::Tick, &stamp("t"));
        state.apply(Command::ResetTimer, &stamp("t"));
        assert_eq!(state.mode(), Mode::ShortBreak);
        assert_eq!(state.time_left(), 2);
        assert_eq!(state.sessions_completed(), 1);
        assert!(!state.is_running());
    }

    #[test]
    fn set_mode_overrides_cadence() {
        let mut state = FocusState::default();
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::SetMode { mode: Mode::LongBreak }, &stamp("t"));
        assert_eq!(state.mode(), Mode::LongBreak);
        assert_eq!(state.time_left(), 900);
        assert!(!state.is_running());
        assert_eq!(state.sessions_completed(), 0);
    }

    #[test]
    fn complete_session_records_task_and_rating_for_work_only() {
        let mut state = FocusState::with_settings(short_settings());
        state.apply(
            Command::SetCurrentTask {
                task: "draft chapter".into(),
            },
            &stamp("t"),
        );
        let rating = Rating::new(4).unwrap();
        state.apply(Command::CompleteSession { rating: Some(rating) }, &stamp("w1"));
        state.apply(Command::CompleteSession { rating: Some(rating) }, &stamp("b1"));

        let brk = &state.history()[0];
        assert_eq!(brk.mode, Mode::ShortBreak);
        assert_eq!(brk.task_name, None);
        assert_eq!(brk.rating, None);

        let work = &state.history()[1];
        assert_eq!(work.mode, Mode::Work);
        assert_eq!(work.duration, 3);
        assert_eq!(work.task_name.as_deref(), Some("draft chapter"));
        assert_eq!(work.rating, Some(rating));
    }

    #[test]
    fn auto_start_flags_drive_running_state() {
        let mut state = FocusState::with_settings(Settings {
            auto_start_breaks: true,
            auto_start_work: false,
            ..short_settings()
        });
        state.apply(Command::CompleteSession { rating: None }, &stamp("a"));
        assert!(state.is_running());
        state.apply(Command::CompleteSession { rating: None }, &stamp("b"));
        assert_eq!(state.mode(), Mode::Work);
        assert!(!state.is_running());

        state.apply(
            Command::UpdateSettings {
                patch: SettingsPatch {
                    auto_start_breaks: Some(false),
                    auto_start_work: Some(true),
                    ..SettingsPatch::default()
                },
            },
            &stamp("t"),
        );
        state.apply(Command::CompleteSession { rating: None }, &stamp("c"));
        assert!(!state.is_running());
        state.apply(Command::CompleteSession { rating: None }, &stamp("d"));
        assert!(state.is_running());
    }

    #[test]
    fn zero_interval_means_every_break_is_long() {
        let mut state = FocusState::with_settings(Settings {
            long_break_interval: 0,
            ..short_settings()
        });
        state.apply(Command::CompleteSession { rating: None }, &stamp("a"));
        assert_eq!(state.mode(), Mode::LongBreak);
        assert_eq!(state.sessions_completed(), 1);
    }

    #[test]
    fn reset_cycle_restores_work() {
        let mut state = FocusState::with_settings(short_settings());
        state.apply(Command::CompleteSession { rating: None }, &stamp("a"));
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::ResetCycle, &stamp("t"));
        assert_eq!(state.mode(), Mode::Work);
        assert_eq!(state.sessions_completed(), 0);
        assert_eq!(state.time_left(), 3);
        assert!(!state.is_running());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn add_scheme_does_not_activate() {
        let mut state = FocusState::default();
        let draft = SchemeDraft {
            name: "Sprint".into(),
            work_duration: 600,
            short_break_duration: 120,
            long_break_duration: 600,
            long_break_interval: 3,
        };
        state.apply(Command::AddScheme { scheme: draft.clone() }, &stamp("s1"));
        assert_eq!(state.schemes().len(), 3);
        assert_eq!(state.find_scheme("s1").unwrap().name, "Sprint");
        assert_eq!(state.active_scheme_id(), "standard");

        let effects = state.apply(Command::AddScheme { scheme: draft }, &stamp("s1"));
        assert!(effects.is_empty());
        assert_eq!(state.schemes().len(), 3);
    }

    #[test]
    fn builtin_schemes_cannot_be_deleted() {
        let mut state = FocusState::default();
        assert!(state
            .apply(Command::DeleteScheme { id: "standard".into() }, &stamp("t"))
            .is_empty());
        assert!(state
            .apply(Command::DeleteScheme { id: "long".into() }, &stamp("t"))
            .is_empty());
        assert!(state
            .apply(Command::DeleteScheme { id: "nope".into() }, &stamp("t"))
            .is_empty());
        assert_eq!(state.schemes().len(), 2);
    }

    #[test]
    fn deleting_active_scheme_falls_back_to_standard() {
        let mut state = FocusState::default();
        let draft = SchemeDraft {
            name: "Tiny".into(),
            work_duration: 60,
            short_break_duration: 10,
            long_break_duration: 30,
            long_break_interval: 2,
        };
        state.apply(Command::AddScheme { scheme: draft }, &stamp("tiny"));
        state.apply(Command::SetActiveScheme { id: "tiny".into() }, &stamp("t"));
        assert_eq!(state.time_left(), 60);
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::Tick, &stamp("t"));
        assert!(state.is_running());

        state.apply(Command::DeleteScheme { id: "tiny".into() }, &stamp("t"));
        assert_eq!(state.active_scheme_id(), "standard");
        assert_eq!(state.settings().work_duration, 1500);
        assert_eq!(state.time_left(), 1500);
        assert!(!state.is_running());
        assert!(state.find_scheme("tiny").is_none());
    }

    #[test]
    fn deleting_inactive_scheme_keeps_countdown() {
        let mut state = FocusState::default();
        let draft = SchemeDraft {
            name: "Tiny".into(),
            work_duration: 60,
            short_break_duration: 10,
            long_break_duration: 30,
            long_break_interval: 2,
        };
        state.apply(Command::AddScheme { scheme: draft }, &stamp("tiny"));
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::Tick, &stamp("t"));

        let effects = state.apply(Command::DeleteScheme { id: "tiny".into() }, &stamp("t"));
        assert_eq!(effects, vec![Effect::Persist]);
        assert!(state.is_running());
        assert_eq!(state.time_left(), 1499);
        assert_eq!(state.active_scheme_id(), "standard");
    }

    #[test]
    fn unknown_active_scheme_falls_back() {
        let mut state = FocusState::default();
        state.apply(Command::SetActiveScheme { id: "long".into() }, &stamp("t"));
        state.apply(Command::SetActiveScheme { id: "ghost".into() }, &stamp("t"));
        assert_eq!(state.active_scheme_id(), "standard");
        assert_eq!(state.settings().work_duration, 1500);
    }

    #[test]
    fn update_settings_leaves_countdown_alone() {
        let mut state = FocusState::default();
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::Tick, &stamp("t"));
        state.apply(
            Command::UpdateSettings {
                patch: SettingsPatch {
                    work_duration: Some(60),
                    ..SettingsPatch::default()
                },
            },
            &stamp("t"),
        );
        assert_eq!(state.time_left(), 1499);
        assert!(state.is_running());
        assert_eq!(state.active_scheme_id(), "standard");
        assert_eq!(state.settings().work_duration, 60);
        assert_eq!(state.status().progress, 0.0);
    }

    #[test]
    fn empty_settings_patch_is_noop() {
        let mut state = FocusState::default();
        let effects = state.apply(
            Command::UpdateSettings {
                patch: SettingsPatch::default(),
            },
            &stamp("t"),
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn rating_patch_applies_once_to_work_head() {
        let mut state = FocusState::with_settings(short_settings());
        let three = Rating::new(3).unwrap();
        let five = Rating::new(5).unwrap();

        assert!(state
            .apply(Command::RateLastSession { rating: three }, &stamp("t"))
            .is_empty());

        state.apply(Command::CompleteSession { rating: None }, &stamp("w"));
        assert_eq!(state.pending_rating().map(|r| r.id.as_str()), Some("w"));
        assert_eq!(
            state.apply(Command::RateLastSession { rating: three }, &stamp("t")),
            vec![Effect::Persist]
        );
        assert!(state
            .apply(Command::RateLastSession { rating: five }, &stamp("t"))
            .is_empty());
        assert_eq!(state.history()[0].rating, Some(three));
        assert!(state.pending_rating().is_none());

        state.apply(Command::CompleteSession { rating: None }, &stamp("b"));
        assert!(state
            .apply(Command::RateLastSession { rating: five }, &stamp("t"))
            .is_empty());
        assert_eq!(state.history()[0].rating, None);
    }

    #[test]
    fn pending_rating_respects_setting() {
        let mut state = FocusState::with_settings(Settings {
            show_rating_modal: false,
            ..short_settings()
        });
        state.apply(Command::CompleteSession { rating: None }, &stamp("w"));
        assert!(state.pending_rating().is_none());
    }

    #[test]
    fn preferences_round_trip_through_commands() {
        let mut state = FocusState::default();
        state.apply(Command::SetTheme { theme: "forest".into() }, &stamp("t"));
        state.apply(Command::ToggleImmersive, &stamp("t"));
        state.apply(Command::SetAmbientSound { sound: None }, &stamp("t"));
        state.apply(
            Command::SetCustomSound {
                url: Some("file:///rain.mp3".into()),
                name: Some("rain".into()),
            },
            &stamp("t"),
        );
        state.apply(Command::SetVolume { volume: 0.8 }, &stamp("t"));
        let prefs = state.preferences();
        assert_eq!(prefs.theme, "forest");
        assert!(prefs.is_immersive);
        assert_eq!(prefs.ambient_sound, None);
        assert_eq!(prefs.custom_sound.name.as_deref(), Some("rain"));
        assert_eq!(prefs.volume, 0.8);
        assert!(state
            .apply(Command::SetVolume { volume: f64::INFINITY }, &stamp("t"))
            .is_empty());
    }

    #[test]
    fn status_reports_progress_and_next_mode() {
        let mut state = FocusState::with_settings(Settings {
            work_duration: 4,
            long_break_interval: 1,
            ..Settings::default()
        });
        state.apply(Command::ToggleTimer, &stamp("t"));
        state.apply(Command::Tick, &stamp("t"));
        let status = state.status();
        assert_eq!(status.time_left, 3);
        assert_eq!(status.total, 4);
        assert_eq!(status.progress, 0.25);
        assert_eq!(status.next_mode, Mode::LongBreak);
        assert!(status.is_running);
    }

    #[test]
    fn normalize_restores_builtins() {
        let json = r#"{"schemes": [], "activeSchemeId": "gone"}"#;
        let mut state: FocusState = serde_json::from_str(json).unwrap();
        assert!(state.normalize());
        assert_eq!(state.schemes()[0].id, "standard");
        assert_eq!(state.schemes()[1].id, "long");
        assert_eq!(state.active_scheme_id(), "standard");
        assert!(!state.normalize());
    }

    #[test]
    fn snapshot_shape_is_flat() {
        let json = serde_json::to_value(FocusState::default()).unwrap();
        assert_eq!(json["timeLeft"], 1500);
        assert_eq!(json["mode"], "work");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["ambientSound"], "white-noise");
        assert_eq!(json["settings"]["longBreakInterval"], 4);
    }
}
