//! # Focusroom Core Library
//!
//! Core logic for the Focusroom interval timer: a work / short break / long
//! break cycle with session history, duration presets ("schemes") and
//! free-form UI preferences. The CLI binary and any other front end are thin
//! hosts over this crate.
//!
//! ## Architecture
//!
//! - **State machine**: [`FocusState`] applies a [`Command`] and returns the
//!   [`Effect`]s to perform. No I/O, no clock reads; the caller drives
//!   `Command::Tick` once per second while the timer runs
//! - **Session**: [`FocusSession`] wraps the state with a [`SnapshotStore`]
//!   and a [`Notifier`], persisting after every mutation
//! - **Storage**: SQLite key-value snapshot and TOML host configuration
//! - **Stats**: summaries over the session history

pub mod error;
pub mod events;
pub mod notify;
pub mod preferences;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Effect, Notification};
pub use notify::{MemoryNotifier, Notifier, NullNotifier};
pub use preferences::{CustomSound, Preferences};
pub use session::{load_state, FocusSession};
pub use stats::{DailyActivity, FocusLevel, HistoryStats};
pub use storage::{Config, Database, MemoryStore, SnapshotStore};
pub use timer::{
    Command, FocusState, Mode, Rating, Scheme, SchemeDraft, SessionRecord, Settings,
    SettingsPatch, Stamp, TimerStatus,
};
