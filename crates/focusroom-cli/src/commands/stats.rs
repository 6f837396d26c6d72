use chrono::Utc;
use focusroom_core::{Config, HistoryStats};

use super::{open_session, print_json, CliResult};

pub fn run(config: &Config) -> CliResult {
    let session = open_session(config)?;
    let stats = HistoryStats::compute(session.state().history(), Utc::now().date_naive());
    print_json(&stats)
}
