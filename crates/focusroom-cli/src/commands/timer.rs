use std::time::Duration;

use clap::Subcommand;
use focusroom_core::{Config, Mode, Rating, SessionRecord, TimerStatus};
use serde::Serialize;
use tokio::time::MissedTickBehavior;

use super::{open_session, print_json, CliResult, CliSession};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start or pause the countdown
    Toggle,
    /// Restart the current interval (paused)
    Reset,
    /// Switch mode, bypassing the long-break cadence
    Mode {
        /// work, short-break or long-break
        mode: Mode,
    },
    /// End the current interval now
    Complete {
        /// Rate the finished focus session, 1-5
        #[arg(long)]
        rating: Option<u8>,
    },
    /// Advance planned time by whole seconds
    Tick {
        #[arg(long, default_value_t = 1)]
        count: u64,
    },
    /// Start over from the first work session of the cycle
    ResetCycle,
    /// Count down in real time until the timer stops
    Run {
        /// Stop after the first completed interval even if the next one
        /// auto-starts
        #[arg(long)]
        once: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TickReport {
    status: TimerStatus,
    /// Intervals completed by these ticks, most recent first.
    completed: Vec<SessionRecord>,
}

pub fn run(action: TimerAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        TimerAction::Status => {}
        TimerAction::Toggle => session.toggle_timer(),
        TimerAction::Reset => session.reset_timer(),
        TimerAction::Mode { mode } => session.set_mode(mode),
        TimerAction::Complete { rating } => {
            let rating = rating.map(Rating::new).transpose()?;
            session.complete_session(rating);
        }
        TimerAction::Tick { count } => {
            let before = session.state().history().len();
            for _ in 0..count {
                if !session.tick() {
                    break;
                }
            }
            let completed = completed_since(&session, before);
            return print_json(&TickReport {
                status: session.state().status(),
                completed,
            });
        }
        TimerAction::ResetCycle => session.reset_cycle(),
        TimerAction::Run { once } => {
            let period = Duration::from_millis(config.clock.tick_interval_ms.max(1));
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(drive(&mut session, period, once))?;
        }
    }

    print_json(&session.state().status())
}

fn completed_since(session: &CliSession, before: usize) -> Vec<SessionRecord> {
    let history = session.state().history();
    let added = history.len().saturating_sub(before);
    history.iter().take(added).cloned().collect()
}

/// Clock driver: one tick per `period` while the timer runs. Ctrl-C pauses
/// the timer and exits.
async fn drive(session: &mut CliSession, period: Duration, once: bool) -> CliResult {
    if !session.state().is_running() {
        session.toggle_timer();
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval fires immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let before = session.state().history().len();
                session.tick();
                let completed = completed_since(session, before);
                for record in &completed {
                    println!("{}", serde_json::to_string(record)?);
                }
                let state = session.state();
                eprint!("\r{:>11} {}  ", state.mode().label(), format_clock(state.time_left()));
                if !state.is_running() || (once && !completed.is_empty()) {
                    eprintln!();
                    break;
                }
            }
            result = &mut ctrl_c => {
                result?;
                eprintln!();
                tracing::info!("interrupted, pausing timer");
                if session.state().is_running() {
                    session.toggle_timer();
                }
                break;
            }
        }
    }
    Ok(())
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
