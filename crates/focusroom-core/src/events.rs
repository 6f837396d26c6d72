use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Side effect requested by a state transition.
///
/// Transitions never perform I/O themselves; `FocusSession` executes these
/// after the new state is in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// The state changed and the snapshot should be rewritten.
    Persist,
    /// A fire-and-forget user notification.
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Copy shown when an interval of `finished` mode ends.
    pub fn session_completed(finished: Mode) -> Self {
        if finished == Mode::Work {
            Self {
                title: "Time for a break!".into(),
                body: "Nice work, you finished a focus session.".into(),
            }
        } else {
            Self {
                title: "Break's over, time to focus!".into(),
                body: "Ready to start the next round?".into(),
            }
        }
    }
}
