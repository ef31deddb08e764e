//! Integration tests for the pool engine and its persistence in the document.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use habitpool_core::pool::{POOL_MAX, POOL_MIN};
use habitpool_core::{
    DrainActivity, MorningInputs, PoolBand, PoolEngine, PoolState, RechargeActivity, UserData,
};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 14).unwrap()
}

fn at(hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 4, 14, hour, 0, 0)
        .unwrap()
}

#[test]
fn test_reset_twice_same_day_is_stable() {
    let engine = PoolEngine::new();
    let inputs = MorningInputs {
        streak_days: 8,
        prior_day_complete: true,
        last_sleep_hours: Some(7.5),
    };
    let first = engine.morning_reset(&PoolState::default(), today(), &inputs);
    let drained = engine.drain(&first, DrainActivity::SocialMedia, at(10));

    let second = engine.morning_reset(&drained, today(), &inputs);
    assert_eq!(second, drained);
    assert_eq!(first.morning_level, 90.0);
}

#[test]
fn test_stale_commit_is_refused() {
    let engine = PoolEngine::new();
    let mut stored = PoolState::default();

    // Two callers compute a reset from the same stale state
    let a = engine.morning_reset(&stored, today(), &MorningInputs::default());
    let b = engine.morning_reset(&stored, today(), &MorningInputs::default());

    assert!(PoolEngine::commit_reset(&mut stored, a));
    stored = engine.drain(&stored, DrainActivity::Gaming, at(11));
    let level = stored.current_level;

    assert!(!PoolEngine::commit_reset(&mut stored, b));
    assert_eq!(stored.current_level, level);
    assert_eq!(stored.drain_events.len(), 1);
}

#[test]
fn test_day_in_the_life() {
    let engine = PoolEngine::new();
    let mut doc = UserData::default();
    let inputs = doc.morning_inputs(today(), Some(4.5));
    let reset = engine.morning_reset(&doc.pool, today(), &inputs);
    doc.set_pool(reset, today());
    assert_eq!(doc.pool.current_level, 50.0);

    let next = engine.recharge(&doc.pool, RechargeActivity::Exercise, at(7));
    doc.set_pool(next, today());
    let next = engine.drain(&doc.pool, DrainActivity::Streaming, at(21));
    doc.set_pool(next, today());

    assert_eq!(doc.pool.current_level, 55.0);
    assert_eq!(doc.pool_history.get(&today()), Some(&55.0));
    assert_eq!(engine.status(doc.pool.current_level).band, PoolBand::Moderate);
}

fn activity() -> impl Strategy<Value = (bool, u8, f64)> {
    (any::<bool>(), 0u8..8, -200.0f64..200.0)
}

proptest! {
    #[test]
    fn prop_level_stays_in_bounds(
        start in 0.0f64..100.0,
        steps in prop::collection::vec(activity(), 0..60),
    ) {
        let engine = PoolEngine::new();
        let mut state = PoolState { current_level: start, ..Default::default() };
        for (is_drain, kind, custom) in steps {
            state = if is_drain {
                let activity = match kind {
                    0 => DrainActivity::SocialMedia,
                    1 => DrainActivity::Gaming,
                    2 => DrainActivity::Streaming,
                    3 => DrainActivity::JunkFood,
                    _ => DrainActivity::Custom(custom),
                };
                engine.drain(&state, activity, at(12))
            } else {
                let activity = match kind {
                    0 => RechargeActivity::Exercise,
                    1 => RechargeActivity::Meditation,
                    2 => RechargeActivity::HabitCompleted,
                    _ => RechargeActivity::Custom(custom),
                };
                engine.recharge(&state, activity, at(12))
            };
            prop_assert!(state.current_level >= POOL_MIN);
            prop_assert!(state.current_level <= POOL_MAX);
        }
    }
}
