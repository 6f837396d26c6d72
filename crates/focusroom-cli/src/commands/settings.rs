use clap::Subcommand;
use focusroom_core::{Config, SettingsPatch};

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print timer settings
    Show,
    /// Change one setting. Does not restart a running countdown.
    Set {
        /// Setting name (e.g. "work-duration", "autoStartBreaks")
        key: String,
        value: String,
    },
}

pub fn run(action: SettingsAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        SettingsAction::Show => {}
        SettingsAction::Set { key, value } => {
            let patch = SettingsPatch::from_key_value(&key, &value)?;
            session.update_settings(patch);
        }
    }
    print_json(session.state().settings())
}
