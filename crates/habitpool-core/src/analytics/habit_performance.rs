//! Per-habit performance over a trailing window.
//!
//! The window is the trailing 30 days ending today (inclusive), not the
//! current calendar month. The trend compares the two 15-day halves of that
//! window as independent slices.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::math::percent;
use crate::habits::{CompletionEvent, DayIndex, Habit};
use crate::streak::{current_run, longest_run};

pub const MONTH_WINDOW_DAYS: usize = 30;
pub const WEEK_WINDOW_DAYS: usize = 7;
const HALF_WINDOW_DAYS: usize = MONTH_WINDOW_DAYS / 2;

/// Trend points beyond which a habit is improving or declining.
const TREND_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_BAND {
            TrendDirection::Improving
        } else if delta < -TREND_BAND {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}

/// How much friction a habit still has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceLevel {
    /// week_rate >= 80
    Low,
    /// week_rate >= 50
    Medium,
    High,
}

impl ResistanceLevel {
    pub fn from_week_rate(rate: f64) -> Self {
        if rate >= 80.0 {
            ResistanceLevel::Low
        } else if rate >= 50.0 {
            ResistanceLevel::Medium
        } else {
            ResistanceLevel::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitPerformance {
    pub habit_id: String,
    pub habit_name: String,
    pub has_enough_data: bool,
    pub event_count: u32,
    pub week_rate: f64,
    pub month_rate: f64,
    /// Rate of the recent half minus rate of the prior half, in points
    pub trend: f64,
    pub trend_direction: TrendDirection,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub resistance_level: ResistanceLevel,
    pub is_sticky: bool,
    pub needs_attention: bool,
}

/// Daily completion series for `habit_id`, oldest first, ending at `today`.
pub fn daily_series(index: &DayIndex, habit_id: &str, today: NaiveDate, days: usize) -> Vec<bool> {
    (0..days as i64)
        .rev()
        .map(|offset| index.is_completed(habit_id, today - Duration::days(offset)))
        .collect()
}

fn rate(series: &[bool]) -> f64 {
    let hits = series.iter().filter(|hit| **hit).count() as u32;
    percent(hits, series.len() as u32)
}

/// Analyze one habit. Needs `min_events` well-formed entries for the habit.
pub fn analyze_habit(
    habit: &Habit,
    log: &[CompletionEvent],
    index: &DayIndex,
    today: NaiveDate,
    min_events: u32,
) -> HabitPerformance {
    let event_count = log
        .iter()
        .filter(|e| e.is_well_formed() && e.habit_id == habit.id)
        .count() as u32;

    let series = daily_series(index, &habit.id, today, MONTH_WINDOW_DAYS);
    let (prior_half, recent_half) = series.split_at(HALF_WINDOW_DAYS);
    let week = &series[MONTH_WINDOW_DAYS - WEEK_WINDOW_DAYS..];

    let week_rate = rate(week);
    let month_rate = rate(&series);
    let trend = rate(recent_half) - rate(prior_half);
    let current_streak = current_run(&series);

    HabitPerformance {
        habit_id: habit.id.clone(),
        habit_name: habit.name.clone(),
        has_enough_data: event_count >= min_events,
        event_count,
        week_rate,
        month_rate,
        trend,
        trend_direction: TrendDirection::from_delta(trend),
        current_streak,
        longest_streak: longest_run(&series),
        resistance_level: ResistanceLevel::from_week_rate(week_rate),
        is_sticky: current_streak >= 7 && week_rate >= 80.0,
        needs_attention: week_rate < 50.0 && trend < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    fn done(days_ago: i64) -> CompletionEvent {
        let ts = (today() - Duration::days(days_ago))
            .and_time(NaiveTime::from_hms_opt(7, 30, 0).unwrap())
            .and_local_timezone(FixedOffset::east_opt(0).unwrap())
            .unwrap();
        CompletionEvent::done("read", ts)
    }

    fn habit() -> Habit {
        Habit {
            id: "read".into(),
            ..Habit::new("Read")
        }
    }

    #[test]
    fn test_series_is_chronological() {
        let log = vec![done(0), done(29)];
        let index = DayIndex::build(&log);
        let series = daily_series(&index, "read", today(), 30);
        assert!(series[0] && series[29]);
        assert_eq!(series.iter().filter(|h| **h).count(), 2);
    }

    #[test]
    fn test_declining_habit_needs_attention() {
        // Solid in the prior half, only twice in the recent half
        let mut log: Vec<_> = (15..30).map(done).collect();
        log.push(done(3));
        log.push(done(10));
        let index = DayIndex::build(&log);
        let perf = analyze_habit(&habit(), &log, &index, today(), 7);

        assert!(perf.has_enough_data);
        assert!((perf.week_rate - 100.0 / 7.0).abs() < 1e-9);
        assert_eq!(perf.trend_direction, TrendDirection::Declining);
        assert!(perf.trend < -5.0);
        assert_eq!(perf.resistance_level, ResistanceLevel::High);
        assert!(perf.needs_attention);
        assert!(!perf.is_sticky);
        assert_eq!(perf.longest_streak, 15);
    }

    #[test]
    fn test_insufficient_events_still_reports_rates() {
        let log: Vec<_> = (0..3).map(done).collect();
        let index = DayIndex::build(&log);
        let perf = analyze_habit(&habit(), &log, &index, today(), 7);
        assert!(!perf.has_enough_data);
        assert_eq!(perf.current_streak, 3);
    }

    #[test]
    fn test_window_trails_from_today() {
        // 30 days ago is outside; 15 days ago opens the prior half's last day
        let log = vec![done(30), done(15)];
        let index = DayIndex::build(&log);
        let perf = analyze_habit(&habit(), &log, &index, today(), 1);
        assert!((perf.month_rate - 100.0 / 30.0).abs() < 1e-9);
        assert!((perf.trend + 100.0 / 15.0).abs() < 1e-9);

        let log = vec![done(14)];
        let index = DayIndex::build(&log);
        let perf = analyze_habit(&habit(), &log, &index, today(), 1);
        assert!((perf.trend - 100.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_bands() {
        assert_eq!(TrendDirection::from_delta(5.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_delta(5.1), TrendDirection::Improving);
        assert_eq!(TrendDirection::from_delta(-5.1), TrendDirection::Declining);
    }
}
