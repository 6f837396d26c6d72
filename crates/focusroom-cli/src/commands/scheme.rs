use clap::Subcommand;
use focusroom_core::{Config, Scheme, SchemeDraft};
use serde::Serialize;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum SchemeAction {
    /// List all schemes
    List,
    /// Add a custom scheme (durations in seconds)
    Add {
        /// Display name
        name: String,
        #[arg(long)]
        work: u64,
        #[arg(long)]
        short_break: u64,
        #[arg(long)]
        long_break: u64,
        /// Work sessions between long breaks
        #[arg(long, default_value_t = 4)]
        interval: u32,
    },
    /// Delete a custom scheme. Deleting the active one switches to
    /// "standard" and pauses the countdown.
    Delete { id: String },
    /// Activate a scheme and restart the current interval
    Use { id: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemeView<'a> {
    #[serde(flatten)]
    scheme: &'a Scheme,
    active: bool,
    builtin: bool,
    cycle_secs: u64,
}

pub fn run(action: SchemeAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        SchemeAction::List => {
            let state = session.state();
            let views: Vec<SchemeView<'_>> = state
                .schemes()
                .iter()
                .map(|scheme| SchemeView {
                    scheme,
                    active: scheme.id == state.active_scheme_id(),
                    builtin: scheme.is_builtin(),
                    cycle_secs: scheme.cycle_secs(),
                })
                .collect();
            print_json(&views)?;
        }
        SchemeAction::Add {
            name,
            work,
            short_break,
            long_break,
            interval,
        } => {
            let draft = SchemeDraft {
                name,
                work_duration: work,
                short_break_duration: short_break,
                long_break_duration: long_break,
                long_break_interval: interval,
            };
            draft.validate()?;
            let id = session
                .add_scheme(draft)
                .ok_or("scheme could not be added")?;
            if let Some(scheme) = session.state().find_scheme(&id) {
                print_json(scheme)?;
            }
        }
        SchemeAction::Delete { id } => {
            if Scheme::is_builtin_id(&id) {
                return Err(format!("cannot delete built-in scheme: {id}").into());
            }
            if !session.delete_scheme(&id) {
                return Err(format!("no such scheme: {id}").into());
            }
            println!("deleted {id}");
        }
        SchemeAction::Use { id } => {
            if session.state().find_scheme(&id).is_none() {
                eprintln!("unknown scheme {id}, using standard");
            }
            session.set_active_scheme(&id);
            print_json(&session.state().status())?;
        }
    }
    Ok(())
}
