use clap::Subcommand;
use focusroom_core::{Config, Rating};

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Completed intervals, most recent first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rate the session that just finished, 1-5
    Rate { stars: u8 },
    /// Print the session awaiting a rating, or null
    Pending,
}

pub fn run(action: HistoryAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        HistoryAction::List { limit } => {
            let history = session.state().history();
            let records: Vec<_> = history
                .iter()
                .take(limit.unwrap_or(history.len()))
                .collect();
            print_json(&records)
        }
        HistoryAction::Rate { stars } => {
            let rating = Rating::new(stars)?;
            if !session.rate_last_session(rating) {
                return Err("no unrated work session to rate".into());
            }
            print_json(&session.state().last_session())
        }
        HistoryAction::Pending => print_json(&session.state().pending_rating()),
    }
}
