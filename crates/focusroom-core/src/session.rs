//! Apply-then-persist wrapper around [`FocusState`].
//!
//! `FocusSession` owns the state, a [`SnapshotStore`] and a [`Notifier`].
//! Each command is applied to the in-memory state first; the effects it
//! returns are executed afterwards. Persistence and notification failures
//! are logged and never undo or block a transition.

use crate::events::{Effect, Notification};
use crate::notify::{Notifier, NullNotifier};
use crate::storage::SnapshotStore;
use crate::timer::{Command, FocusState, Mode, Rating, SchemeDraft, SettingsPatch, Stamp};

/// Read the snapshot from `store`, falling back to defaults when it is
/// missing, unreadable or corrupt. Never fails.
pub fn load_state<S: SnapshotStore>(store: &S) -> FocusState {
    match store.load_snapshot() {
        Ok(Some(json)) => match serde_json::from_str::<FocusState>(&json) {
            Ok(mut state) => {
                if state.normalize() {
                    tracing::info!("repaired scheme references in stored state");
                }
                state
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored state is corrupt, starting from defaults");
                FocusState::default()
            }
        },
        Ok(None) => FocusState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored state, starting from defaults");
            FocusState::default()
        }
    }
}

pub struct FocusSession<S, N = NullNotifier> {
    state: FocusState,
    store: S,
    notifier: N,
}

impl<S: SnapshotStore, N: Notifier> FocusSession<S, N> {
    /// Rehydrate from `store` (or defaults) and wire up `notifier`.
    pub fn open(store: S, notifier: N) -> Self {
        let state = load_state(&store);
        Self {
            state,
            store,
            notifier,
        }
    }

    /// Start from an explicit state instead of the stored one.
    pub fn with_state(state: FocusState, store: S, notifier: N) -> Self {
        Self {
            state,
            store,
            notifier,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Apply a command stamped with the current time and a fresh id.
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        self.dispatch_with(command, &Stamp::now())
    }

    pub fn dispatch_with(&mut self, command: Command, stamp: &Stamp) -> bool {
        let effects = self.state.apply(command, stamp);
        let changed = !effects.is_empty();
        for effect in effects {
            match effect {
                Effect::Persist => self.persist(),
                Effect::Notify(notification) => self.deliver(&notification),
            }
        }
        changed
    }

    /// Write the current state to the store. Failures are logged only.
    pub fn persist(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize state");
                return;
            }
        };
        if let Err(e) = self.store.save_snapshot(&json) {
            tracing::warn!(error = %e, "failed to persist state");
        }
    }

    fn deliver(&self, notification: &Notification) {
        if let Err(e) = self.notifier.notify(notification) {
            tracing::warn!(error = %e, title = %notification.title, "notification not delivered");
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    pub fn tick(&mut self) -> bool {
        self.dispatch(Command::Tick)
    }

    pub fn toggle_timer(&mut self) {
        self.dispatch(Command::ToggleTimer);
    }

    pub fn reset_timer(&mut self) {
        self.dispatch(Command::ResetTimer);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.dispatch(Command::SetMode { mode });
    }

    pub fn complete_session(&mut self, rating: Option<Rating>) {
        self.dispatch(Command::CompleteSession { rating });
    }

    pub fn reset_cycle(&mut self) {
        self.dispatch(Command::ResetCycle);
    }

    /// Returns the id assigned to the new scheme.
    pub fn add_scheme(&mut self, scheme: SchemeDraft) -> Option<String> {
        let stamp = Stamp::now();
        self.dispatch_with(Command::AddScheme { scheme }, &stamp)
            .then_some(stamp.id)
    }

    /// Returns false for built-in or unknown ids.
    pub fn delete_scheme(&mut self, id: &str) -> bool {
        self.dispatch(Command::DeleteScheme { id: id.to_string() })
    }

    pub fn set_active_scheme(&mut self, id: &str) {
        self.dispatch(Command::SetActiveScheme { id: id.to_string() });
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> bool {
        self.dispatch(Command::UpdateSettings { patch })
    }

    /// Returns false when there is no unrated work session at the head of
    /// history.
    pub fn rate_last_session(&mut self, rating: Rating) -> bool {
        self.dispatch(Command::RateLastSession { rating })
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.dispatch(Command::SetTheme {
            theme: theme.into(),
        });
    }

    pub fn toggle_immersive(&mut self) {
        self.dispatch(Command::ToggleImmersive);
    }

    pub fn set_ambient_sound(&mut self, sound: Option<String>) {
        self.dispatch(Command::SetAmbientSound { sound });
    }

    pub fn set_custom_sound(&mut self, url: Option<String>, name: Option<String>) {
        self.dispatch(Command::SetCustomSound { url, name });
    }

    pub fn set_volume(&mut self, volume: f64) -> bool {
        self.dispatch(Command::SetVolume { volume })
    }

    pub fn set_current_task(&mut self, task: impl Into<String>) {
        self.dispatch(Command::SetCurrentTask { task: task.into() });
    }
}
