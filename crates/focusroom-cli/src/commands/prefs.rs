use clap::Subcommand;
use focusroom_core::Config;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print appearance and audio preferences
    Show,
    /// Set the theme name
    Theme { theme: String },
    /// Toggle immersive mode
    Immersive,
    /// Pick an ambient sound ("none" to turn it off)
    Sound { sound: String },
    /// Point at a custom sound file
    CustomSound {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Playback volume, 0.0 to 1.0
    Volume {
        #[arg(allow_negative_numbers = true)]
        volume: f64,
    },
    /// Task attached to the next completed focus session (empty to clear)
    Task { task: Vec<String> },
}

pub fn run(action: PrefsAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        PrefsAction::Show => {}
        PrefsAction::Theme { theme } => session.set_theme(theme),
        PrefsAction::Immersive => session.toggle_immersive(),
        PrefsAction::Sound { sound } => {
            let sound = (!sound.eq_ignore_ascii_case("none")).then_some(sound);
            session.set_ambient_sound(sound);
        }
        PrefsAction::CustomSound { url, name } => session.set_custom_sound(url, name),
        PrefsAction::Volume { volume } => {
            if !session.set_volume(volume) {
                return Err(format!("invalid volume: {volume}").into());
            }
        }
        PrefsAction::Task { task } => session.set_current_task(task.join(" ")),
    }
    print_json(session.state().preferences())
}
