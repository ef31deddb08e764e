//! Integration tests for the pattern analytics engine.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};
use habitpool_core::analytics::{
    pearson, CorrelationStrength, InsightCategory, ResistanceLevel, TrendDirection,
};
use habitpool_core::{CompletionEvent, Habit, PatternAnalyzer};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

fn event(habit: &str, date: NaiveDate, hour: u32, completed: bool) -> CompletionEvent {
    let ts = date
        .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
        .and_local_timezone(FixedOffset::east_opt(3600).unwrap())
        .unwrap();
    if completed {
        CompletionEvent::done(habit, ts)
    } else {
        CompletionEvent::missed(habit, ts)
    }
}

#[test]
fn test_seven_straight_days_is_sticky() {
    let habit = Habit::new("Floss");
    let log: Vec<_> = (0..7)
        .map(|d| event(&habit.id, today() - Duration::days(d), 21, true))
        .collect();

    let report = PatternAnalyzer::new().analyze(&log, &[habit.clone()], &BTreeMap::new(), today());
    let perf = report.habit(&habit.id).unwrap();

    assert!(perf.has_enough_data);
    assert_eq!(perf.week_rate, 100.0);
    assert_eq!(perf.resistance_level, ResistanceLevel::Low);
    assert!(perf.is_sticky);
    assert_eq!(perf.trend_direction, TrendDirection::Improving);
    assert_eq!(report.best_habit.as_deref(), Some(habit.id.as_str()));
    assert!(report
        .insights
        .iter()
        .any(|i| i.category == InsightCategory::Praise));
}

#[test]
fn test_pool_days_drive_completion() {
    let habits: Vec<Habit> = (0..10).map(|i| Habit::new(format!("Habit {i}"))).collect();
    let mut history = BTreeMap::new();
    let mut log = Vec::new();

    for d in 0..20i64 {
        let date = today() - Duration::days(d);
        let high = d % 2 == 0;
        let completed = match (high, (d / 2) % 2 == 0) {
            (true, true) => 8,
            (true, false) => 10,
            (false, true) => 3,
            (false, false) => 5,
        };
        history.insert(date, if high { 80.0 } else { 30.0 });
        for (i, habit) in habits.iter().enumerate() {
            log.push(event(&habit.id, date, 12, i < completed));
        }
    }

    let report = PatternAnalyzer::new().analyze(&log, &habits, &history, today());
    let corr = &report.correlation;

    assert!(corr.has_enough_data);
    assert_eq!(corr.aligned_points, 20);
    assert!((corr.high_pool_rate - 90.0).abs() < 1e-9);
    assert!((corr.low_pool_rate - 40.0).abs() < 1e-9);
    assert!((corr.pool_impact - 50.0).abs() < 1e-9);
    assert!(corr.pool_matters);
    assert!(matches!(
        corr.strength,
        CorrelationStrength::Moderate | CorrelationStrength::Strong
    ));
    assert!(report
        .insights
        .iter()
        .any(|i| i.category == InsightCategory::Pool));
}

#[test]
fn test_weekend_warrior() {
    // Four weeks; per weekday 5 entries each week
    let mut log = Vec::new();
    let mut per_weekday: BTreeMap<u32, u32> = BTreeMap::new();
    for d in 0..28i64 {
        let date = today() - Duration::days(d);
        let weekend = date.weekday().num_days_from_monday() >= 5;
        for slot in 0..5u32 {
            let n = per_weekday.entry(date.weekday().num_days_from_monday()).or_default();
            // Weekends: 17 of 20 done (85%), weekdays: 12 of 20 done (60%)
            let done = if weekend { *n < 17 } else { *n < 12 };
            *n += 1;
            log.push(event("stretch", date, 8 + slot, done));
        }
    }

    let report = PatternAnalyzer::new().analyze(&log, &[], &BTreeMap::new(), today());
    let dow = &report.day_of_week;

    assert!(dow.has_enough_data);
    assert!((dow.weekend_average - 85.0).abs() < 1e-9);
    assert!((dow.weekday_average - 60.0).abs() < 1e-9);
    assert!(dow.weekend_warrior);
    assert!(!dow.weekday_dipper);
}

#[test]
fn test_sparse_history_is_gated() {
    let log = vec![event("x", today(), 9, true)];
    let report = PatternAnalyzer::new().analyze(&log, &[], &BTreeMap::new(), today());
    assert!(!report.time_of_day.has_enough_data);
    assert!(!report.day_of_week.has_enough_data);
    assert!(!report.correlation.has_enough_data);
    assert!(report.insights.is_empty());
}

#[test]
fn test_malformed_entries_are_skipped() {
    let mut log: Vec<_> = (0..20)
        .map(|d| event("run", today() - Duration::days(d), 7, true))
        .collect();
    let mut broken = event("run", today(), 7, true);
    broken.timestamp = None;
    log.push(broken);

    let report = PatternAnalyzer::new().analyze(&log, &[], &BTreeMap::new(), today());
    assert_eq!(report.summary.skipped_entries, 1);
    assert_eq!(report.summary.total_completions, 20);
    assert_eq!(report.time_of_day.total_events, 20);
}

proptest! {
    #[test]
    fn prop_pearson_ignores_order(
        pairs in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = pairs.clone();
        // Deterministic permutation driven by the seed
        let len = shuffled.len();
        for i in (1..len).rev() {
            let j = (seed.wrapping_mul(i as u64 + 7) % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }
        prop_assert!((pearson(&pairs) - pearson(&shuffled)).abs() < 1e-9);
    }
}
