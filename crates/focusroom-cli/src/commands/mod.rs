pub mod config;
pub mod history;
pub mod prefs;
pub mod scheme;
pub mod settings;
pub mod stats;
pub mod timer;

use focusroom_core::{Config, Database, FocusSession, Notifier, NullNotifier};
use serde::Serialize;

use crate::notifier::DesktopNotifier;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type CliSession = FocusSession<Database, Box<dyn Notifier>>;

/// Open the stored session, notifying on the desktop unless disabled.
pub fn open_session(config: &Config) -> Result<CliSession, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(DesktopNotifier::new(config.notifications.timeout_ms))
    } else {
        Box::new(NullNotifier)
    };
    Ok(FocusSession::open(db, notifier))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
