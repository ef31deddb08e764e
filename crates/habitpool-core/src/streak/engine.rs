//! Rolling-window, miss-tolerant streak and consistency engine.
//!
//! Instead of a binary day streak that resets on the first miss, the engine
//! reports the share of days in a trailing window that satisfied a hit
//! criterion, alongside the current and best runs inside that window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::runs::{current_run, longest_run};
use crate::habits::{CompletionEvent, DayIndex};

/// Longest window the engine will evaluate (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Configuration for streak computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    /// Length of the trailing window in days, clamped to 1..=MAX_WINDOW_DAYS
    pub window_days: u32,
    /// Days of history needed before metrics are trusted
    pub min_history_days: u32,
    /// Share of habits (0.0-1.0) that must be completed for an aggregate hit
    pub aggregate_hit_ratio: f64,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_history_days: 7,
            aggregate_hit_ratio: 0.75,
        }
    }
}

/// What the streak is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreakScope {
    /// A single habit
    Habit(String),
    /// All habits together; `habit_count` is the number of tracked habits
    All { habit_count: usize },
}

/// What counts as a hit for a given day.
#[derive(Debug, Clone, PartialEq)]
pub enum HitRule {
    /// At least one completed entry for the habit
    AnyCompletion(String),
    /// Completed habits / habit_count >= threshold
    DailyRatio { habit_count: usize, threshold: f64 },
}

impl HitRule {
    pub fn is_hit(&self, index: &DayIndex, date: NaiveDate) -> bool {
        match self {
            HitRule::AnyCompletion(habit_id) => index.is_completed(habit_id, date),
            HitRule::DailyRatio {
                habit_count,
                threshold,
            } => {
                if *habit_count == 0 {
                    return false;
                }
                // Entries for habits outside the tracked set never push past 100%
                let completed = index.completed_habits(date).min(*habit_count);
                let ratio = completed as f64 / *habit_count as f64;
                ratio >= *threshold
            }
        }
    }
}

/// Consistency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    /// Score >= 80
    Solid,
    /// 60 <= score < 80
    Building,
    /// Score < 60
    Rebuilding,
}

impl StreakStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => StreakStatus::Solid,
            60..=79 => StreakStatus::Building,
            _ => StreakStatus::Rebuilding,
        }
    }

    pub fn color_token(&self) -> &'static str {
        match self {
            StreakStatus::Solid => "emerald",
            StreakStatus::Building => "amber",
            StreakStatus::Rebuilding => "sky",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakStatus::Solid => "Rock solid. This is part of who you are now.",
            StreakStatus::Building => "Building momentum. Keep showing up.",
            StreakStatus::Rebuilding => "Rebuilding. Every day you show up counts.",
        }
    }
}

/// Derived streak metrics. Never persisted as a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current_run: u32,
    pub best_run: u32,
    /// Percentage of hit days in the window (0-100)
    pub consistency_score: u8,
    pub status: StreakStatus,
    pub color_token: String,
    pub message: String,
    /// False when fewer than `min_history_days` of history exist
    pub has_enough_data: bool,
    pub hits: u32,
    pub window_days: u32,
}

/// Streak engine. Pure over its inputs.
#[derive(Debug, Clone, Default)]
pub struct StreakEngine {
    config: StreakConfig,
}

impl StreakEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StreakConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    /// Hit rule for a scope, using the configured aggregate threshold.
    pub fn rule_for(&self, scope: &StreakScope) -> HitRule {
        match scope {
            StreakScope::Habit(id) => HitRule::AnyCompletion(id.clone()),
            StreakScope::All { habit_count } => HitRule::DailyRatio {
                habit_count: *habit_count,
                threshold: self.config.aggregate_hit_ratio,
            },
        }
    }

    /// Compute streak metrics for a habit or for all habits.
    pub fn compute(
        &self,
        scope: &StreakScope,
        log: &[CompletionEvent],
        today: NaiveDate,
    ) -> StreakResult {
        let index = DayIndex::build(log);
        let rule = self.rule_for(scope);
        let first_day = match scope {
            StreakScope::Habit(id) => index.first_day(Some(id)),
            StreakScope::All { .. } => index.first_day(None),
        };
        self.compute_with(|date| rule.is_hit(&index, date), first_day, today)
    }

    /// Compute streak metrics with an arbitrary hit predicate.
    ///
    /// `first_day` is the earliest day with relevant history; it only drives
    /// `has_enough_data`. Days without data always count as misses.
    pub fn compute_with<F>(
        &self,
        is_hit: F,
        first_day: Option<NaiveDate>,
        today: NaiveDate,
    ) -> StreakResult
    where
        F: Fn(NaiveDate) -> bool,
    {
        let window_days = self.config.window_days.clamp(1, MAX_WINDOW_DAYS);
        // Days before the start of the calendar count as misses
        let series: Vec<bool> = (0..window_days as i64)
            .rev()
            .map(|offset| {
                today
                    .checked_sub_signed(Duration::days(offset))
                    .is_some_and(|date| is_hit(date))
            })
            .collect();

        let hits = series.iter().filter(|hit| **hit).count() as u32;
        let consistency_score =
            ((100.0 * hits as f64 / window_days as f64).round() as u8).min(100);
        let status = StreakStatus::from_score(consistency_score);

        let history_days = first_day.map_or(0, |first| (today - first).num_days() + 1);
        let has_enough_data = history_days >= self.config.min_history_days as i64;

        StreakResult {
            current_run: current_run(&series),
            best_run: longest_run(&series),
            consistency_score,
            status,
            color_token: status.color_token().to_string(),
            message: status.message().to_string(),
            has_enough_data,
            hits,
            window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn done(habit: &str, days_ago: i64) -> CompletionEvent {
        let date = today() - Duration::days(days_ago);
        let ts = date
            .and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .and_local_timezone(FixedOffset::east_opt(0).unwrap())
            .unwrap();
        CompletionEvent::done(habit, ts)
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(StreakStatus::from_score(100), StreakStatus::Solid);
        assert_eq!(StreakStatus::from_score(80), StreakStatus::Solid);
        assert_eq!(StreakStatus::from_score(79), StreakStatus::Building);
        assert_eq!(StreakStatus::from_score(60), StreakStatus::Building);
        assert_eq!(StreakStatus::from_score(59), StreakStatus::Rebuilding);
    }

    #[test]
    fn test_today_pending_does_not_break_run() {
        let engine = StreakEngine::new();
        let log: Vec<_> = (1..=5).map(|d| done("a", d)).collect();
        let result = engine.compute(&StreakScope::Habit("a".into()), &log, today());
        assert_eq!(result.current_run, 5);
        assert_eq!(result.best_run, 5);
        assert_eq!(result.hits, 5);
        assert!(!result.has_enough_data);
    }

    #[test]
    fn test_one_miss_keeps_consistency() {
        let engine = StreakEngine::new();
        let log: Vec<_> = (0..30).filter(|d| *d != 10).map(|d| done("a", d)).collect();
        let result = engine.compute(&StreakScope::Habit("a".into()), &log, today());
        assert_eq!(result.current_run, 10);
        assert_eq!(result.best_run, 19);
        assert_eq!(result.consistency_score, 97);
        assert_eq!(result.status, StreakStatus::Solid);
        assert!(result.has_enough_data);
    }

    #[test]
    fn test_aggregate_ratio_rule() {
        let engine = StreakEngine::new();
        // Two of three habits today (0.66 < 0.75), all three yesterday
        let log = vec![
            done("a", 0),
            done("b", 0),
            done("a", 1),
            done("b", 1),
            done("c", 1),
        ];
        let result = engine.compute(&StreakScope::All { habit_count: 3 }, &log, today());
        assert_eq!(result.hits, 1);
        assert_eq!(result.current_run, 1);
    }

    #[test]
    fn test_compute_with_custom_predicate() {
        let engine = StreakEngine::with_config(StreakConfig {
            window_days: 10,
            ..Default::default()
        });
        let result = engine.compute_with(|_| true, Some(today()), today());
        assert_eq!(result.current_run, 10);
        assert_eq!(result.consistency_score, 100);
        assert!(!result.has_enough_data);
    }

    #[test]
    fn test_aggregate_with_no_habits_is_zero() {
        let engine = StreakEngine::new();
        let log = vec![done("a", 0)];
        let result = engine.compute(&StreakScope::All { habit_count: 0 }, &log, today());
        assert_eq!(result.hits, 0);
        assert_eq!(result.consistency_score, 0);
    }

    #[test]
    fn test_oversized_window_is_capped() {
        let engine = StreakEngine::with_config(StreakConfig {
            window_days: 100_000_000,
            ..Default::default()
        });
        let result = engine.compute(&StreakScope::All { habit_count: 1 }, &[], today());
        assert_eq!(result.window_days, MAX_WINDOW_DAYS);
        assert_eq!(result.consistency_score, 0);

        let result = engine.compute_with(|_| true, None, today());
        assert_eq!(result.current_run, MAX_WINDOW_DAYS);
    }

    #[test]
    fn test_window_before_calendar_start_counts_as_misses() {
        let start = NaiveDate::MIN + Duration::days(5);
        let result = StreakEngine::new().compute_with(|_| true, None, start);
        assert_eq!(result.window_days, 30);
        assert_eq!(result.hits, 6);
        assert_eq!(result.current_run, 6);
    }

    #[test]
    fn test_untracked_habits_do_not_inflate_ratio() {
        // "orphan" is not one of the tracked habits
        let log = vec![done("a", 0), done("orphan", 0)];
        let index = DayIndex::build(&log);
        let over_full = HitRule::DailyRatio {
            habit_count: 1,
            threshold: 1.5,
        };
        assert!(!over_full.is_hit(&index, today()));

        let full = HitRule::DailyRatio {
            habit_count: 1,
            threshold: 1.0,
        };
        assert!(full.is_hit(&index, today()));
    }
}
