//! Appearance and audio preferences.
//!
//! These ride along in the state snapshot so a UI can restore them, but the
//! state machine never interprets them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSound {
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: String,
    pub is_immersive: bool,
    pub ambient_sound: Option<String>,
    pub custom_sound: CustomSound,
    /// Playback volume, 0.0 to 1.0.
    pub volume: f64,
    /// Free text attached to the next completed work record.
    pub current_task: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            is_immersive: false,
            ambient_sound: Some("white-noise".into()),
            custom_sound: CustomSound::default(),
            volume: 0.5,
            current_task: String::new(),
        }
    }
}

impl Preferences {
    /// Clamp into 0.0..=1.0. Returns false for NaN/infinite input, which is
    /// ignored.
    pub fn set_volume(&mut self, volume: f64) -> bool {
        if !volume.is_finite() {
            return false;
        }
        self.volume = volume.clamp(0.0, 1.0);
        true
    }

    /// The current task, if any, as it should appear on a work record.
    pub fn task_name(&self) -> Option<String> {
        let task = self.current_task.trim();
        (!task.is_empty()).then(|| task.to_string())
    }
}
