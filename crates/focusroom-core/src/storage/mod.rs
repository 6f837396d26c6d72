mod config;
pub mod database;

pub use config::{ClockConfig, Config, LoggingConfig, NotificationsConfig};
pub use database::{Database, STATE_KEY};

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use crate::error::Result;

/// Durable home for the serialized state snapshot.
///
/// The store holds one opaque document; parsing and fallback to defaults
/// happen in the session layer.
pub trait SnapshotStore {
    fn load_snapshot(&self) -> Result<Option<String>>;
    fn save_snapshot(&self, snapshot: &str) -> Result<()>;
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot.into())),
            writes: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl SnapshotStore for MemoryStore {
    fn load_snapshot(&self) -> Result<Option<String>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save_snapshot(&self, snapshot: &str) -> Result<()> {
        *self.snapshot.borrow_mut() = Some(snapshot.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSROOM_DATA_DIR` overrides the location outright. Otherwise it is
/// `~/.config/focusroom/`, or `~/.config/focusroom-dev/` when
/// `FOCUSROOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("FOCUSROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusroom-dev")
            } else {
                base_dir.join("focusroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
