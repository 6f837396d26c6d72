//! Summary statistics over session history.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::timer::SessionRecord;

/// Days covered by [`HistoryStats::daily`].
pub const ACTIVITY_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusLevel {
    Beginner,
    Intermediate,
    Focused,
    Master,
}

impl FocusLevel {
    pub fn from_sessions(work_sessions: usize) -> Self {
        match work_sessions {
            0..=4 => FocusLevel::Beginner,
            5..=19 => FocusLevel::Intermediate,
            20..=49 => FocusLevel::Focused,
            _ => FocusLevel::Master,
        }
    }
}

/// Focus time on one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub focus_min: f64,
    /// 0 to 4, one step per half hour of focus.
    pub intensity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub work_sessions: usize,
    pub total_focus_secs: u64,
    /// Mean over rated work sessions; absent when none are rated.
    pub average_rating: Option<f64>,
    pub focus_level: FocusLevel,
    /// Oldest first, ending at `today`.
    pub daily: Vec<DailyActivity>,
}

impl HistoryStats {
    pub fn compute<'a, I>(history: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a SessionRecord>,
    {
        let work: Vec<&SessionRecord> = history.into_iter().filter(|r| r.is_work()).collect();

        let total_focus_secs = work.iter().map(|r| r.duration).sum();

        let ratings: Vec<u8> = work
            .iter()
            .filter_map(|r| r.rating.map(|rating| rating.stars()))
            .collect();
        let average_rating = (!ratings.is_empty()).then(|| {
            ratings.iter().map(|&s| f64::from(s)).sum::<f64>() / ratings.len() as f64
        });

        let daily = (0..ACTIVITY_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago as i64);
                let secs: u64 = work
                    .iter()
                    .filter(|r| r.timestamp.date_naive() == date)
                    .map(|r| r.duration)
                    .sum();
                let focus_min = secs as f64 / 60.0;
                let intensity = ((focus_min / 30.0).floor() as u64).min(4) as u8;
                DailyActivity {
                    date,
                    focus_min,
                    intensity,
                }
            })
            .collect();

        Self {
            work_sessions: work.len(),
            total_focus_secs,
            average_rating,
            focus_level: FocusLevel::from_sessions(work.len()),
            daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{Mode, Rating};
    use chrono::{TimeZone, Utc};

    fn record(mode: Mode, duration: u64, day: u32, rating: Option<u8>) -> SessionRecord {
        SessionRecord {
            id: format!("{mode}-{day}-{duration}"),
            mode,
            duration,
            timestamp: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            task_name: None,
            rating: rating.map(|r| Rating::new(r).unwrap()),
        }
    }

    #[test]
    fn empty_history() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let stats = HistoryStats::compute(&Vec::<SessionRecord>::new(), today);
        assert_eq!(stats.work_sessions, 0);
        assert_eq!(stats.total_focus_secs, 0);
        assert_eq!(stats.average_rating, None);
        assert_eq!(stats.focus_level, FocusLevel::Beginner);
        assert_eq!(stats.daily.len(), ACTIVITY_DAYS);
        assert_eq!(stats.daily.last().unwrap().date, today);
        assert_eq!(
            stats.daily[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
        );
    }

    #[test]
    fn counts_only_work_sessions() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let history = vec![
            record(Mode::Work, 1500, 10, Some(5)),
            record(Mode::ShortBreak, 300, 10, None),
            record(Mode::Work, 1500, 10, None),
            record(Mode::Work, 3000, 9, Some(2)),
            record(Mode::LongBreak, 900, 9, None),
            record(Mode::Work, 1500, 1, None),
        ];
        let stats = HistoryStats::compute(&history, today);
        assert_eq!(stats.work_sessions, 4);
        assert_eq!(stats.total_focus_secs, 7500);
        assert_eq!(stats.average_rating, Some(3.5));

        let last = stats.daily.last().unwrap();
        assert_eq!(last.focus_min, 50.0);
        assert_eq!(last.intensity, 1);
        let yesterday = &stats.daily[ACTIVITY_DAYS - 2];
        assert_eq!(yesterday.focus_min, 50.0);
        // day 1 is outside the window
        let windowed: f64 = stats.daily.iter().map(|d| d.focus_min).sum();
        assert_eq!(windowed, 100.0);
    }

    #[test]
    fn intensity_caps_at_four() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let history: Vec<_> = (0..6).map(|_| record(Mode::Work, 3000, 10, None)).collect();
        let stats = HistoryStats::compute(&history, today);
        assert_eq!(stats.daily.last().unwrap().intensity, 4);
        assert_eq!(stats.focus_level, FocusLevel::Intermediate);
    }

    #[test]
    fn focus_levels() {
        assert_eq!(FocusLevel::from_sessions(4), FocusLevel::Beginner);
        assert_eq!(FocusLevel::from_sessions(5), FocusLevel::Intermediate);
        assert_eq!(FocusLevel::from_sessions(20), FocusLevel::Focused);
        assert_eq!(FocusLevel::from_sessions(50), FocusLevel::Master);
    }
}
