//! Drive capacity ("pool") simulation.
//!
//! The pool is a single scalar in [0, 100]. It is reset once per calendar day
//! from streak, yesterday's completion and sleep, then moved by discrete drain
//! and recharge events. State is an explicit value: every operation takes a
//! `PoolState` and returns the next one, there is no hidden cache.
//!
//! Mutations are additive and clamped, so they commute except when the level
//! saturates at 0 or 100.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::activity::{DrainActivity, RechargeActivity};
use super::status::{PoolBand, PoolStatus};

pub const POOL_MIN: f64 = 0.0;
pub const POOL_MAX: f64 = 100.0;

/// Configuration for the pool simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Level every morning starts from before adjustments
    pub base_level: f64,
    /// Bonus when every habit was completed the previous day
    pub prior_day_bonus: f64,
    /// Level at or above which the pool is "high"
    pub high_threshold: f64,
    /// Level below which the pool is "low"
    pub low_threshold: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            base_level: 65.0,
            prior_day_bonus: 10.0,
            high_threshold: 70.0,
            low_threshold: 40.0,
        }
    }
}

/// A recorded drain or recharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEvent {
    pub label: String,
    /// Signed change actually applied after clamping
    pub delta_applied: f64,
    pub level_after: f64,
    pub at: DateTime<FixedOffset>,
}

/// Persisted pool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolState {
    pub current_level: f64,
    pub morning_level: f64,
    pub last_updated_date: Option<NaiveDate>,
    pub drain_events: Vec<PoolEvent>,
    pub recharge_events: Vec<PoolEvent>,
}

impl Default for PoolState {
    fn default() -> Self {
        Self {
            current_level: 65.0,
            morning_level: 65.0,
            last_updated_date: None,
            drain_events: Vec::new(),
            recharge_events: Vec::new(),
        }
    }
}

impl PoolState {
    /// Whether the morning reset already ran for `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.last_updated_date == Some(today)
    }
}

/// Inputs to the morning reset. Every field has a neutral default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorningInputs {
    /// Current streak length in days
    pub streak_days: u32,
    /// Whether all habits were completed yesterday
    pub prior_day_complete: bool,
    /// Hours slept last night, if known
    pub last_sleep_hours: Option<f64>,
}

/// Bonus from the current streak length.
pub fn streak_bonus(streak_days: u32) -> f64 {
    match streak_days {
        0..=2 => 0.0,
        3..=6 => 5.0,
        7..=13 => 10.0,
        _ => 15.0,
    }
}

/// Adjustment from last night's sleep.
pub fn sleep_adjustment(hours: Option<f64>) -> f64 {
    match hours {
        None => 0.0,
        Some(h) if !h.is_finite() => 0.0,
        Some(h) if h < 5.0 => -15.0,
        Some(h) if h < 6.0 => -10.0,
        Some(h) if h < 7.0 => -5.0,
        Some(h) if h <= 9.0 => 5.0,
        Some(_) => 0.0,
    }
}

fn clamp_level(level: f64) -> f64 {
    if level.is_nan() {
        return POOL_MIN;
    }
    level.clamp(POOL_MIN, POOL_MAX)
}

/// Pool simulation engine.
#[derive(Debug, Clone, Default)]
pub struct PoolEngine {
    config: PoolConfig,
}

impl PoolEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PoolConfig) -> Self {
        Self { config }
    }

    /// Level a fresh day starts at for the given inputs.
    pub fn morning_level(&self, inputs: &MorningInputs) -> f64 {
        let prior = if inputs.prior_day_complete {
            self.config.prior_day_bonus
        } else {
            0.0
        };
        clamp_level(
            self.config.base_level
                + streak_bonus(inputs.streak_days)
                + prior
                + sleep_adjustment(inputs.last_sleep_hours),
        )
    }

    /// Once-per-day reset. Returns the state unchanged when it was already
    /// reset for `today`.
    pub fn morning_reset(
        &self,
        state: &PoolState,
        today: NaiveDate,
        inputs: &MorningInputs,
    ) -> PoolState {
        if state.is_current(today) {
            tracing::debug!(%today, "pool already reset today");
            return state.clone();
        }

        let level = self.morning_level(inputs);
        tracing::info!(%today, level, streak_days = inputs.streak_days, "pool morning reset");

        PoolState {
            current_level: level,
            morning_level: level,
            last_updated_date: Some(today),
            drain_events: Vec::new(),
            recharge_events: Vec::new(),
        }
    }

    /// Write a proposed reset into the stored state.
    ///
    /// The stored date is re-checked at write time: if the stored state was
    /// already reset for the proposed date (or later) it is left untouched and
    /// `false` is returned.
    pub fn commit_reset(stored: &mut PoolState, proposed: PoolState) -> bool {
        if stored.last_updated_date >= proposed.last_updated_date {
            tracing::warn!(
                stored = ?stored.last_updated_date,
                proposed = ?proposed.last_updated_date,
                "refusing pool reset, stored state is already current"
            );
            return false;
        }
        *stored = proposed;
        true
    }

    /// Apply a drain event.
    pub fn drain(
        &self,
        state: &PoolState,
        activity: DrainActivity,
        at: DateTime<FixedOffset>,
    ) -> PoolState {
        let mut next = state.clone();
        let event = Self::apply(&mut next, -activity.impact(), activity.label(), at);
        tracing::debug!(label = %event.label, level = event.level_after, "pool drained");
        next.drain_events.push(event);
        next
    }

    /// Apply a recharge event.
    pub fn recharge(
        &self,
        state: &PoolState,
        activity: RechargeActivity,
        at: DateTime<FixedOffset>,
    ) -> PoolState {
        let mut next = state.clone();
        let event = Self::apply(&mut next, activity.boost(), activity.label(), at);
        tracing::debug!(label = %event.label, level = event.level_after, "pool recharged");
        next.recharge_events.push(event);
        next
    }

    fn apply(state: &mut PoolState, delta: f64, label: &str, at: DateTime<FixedOffset>) -> PoolEvent {
        // A non-finite delta is recorded but moves nothing
        let delta = if delta.is_finite() { delta } else { 0.0 };
        let before = clamp_level(state.current_level);
        let after = clamp_level(before + delta);
        state.current_level = after;
        PoolEvent {
            label: label.to_string(),
            delta_applied: after - before,
            level_after: after,
            at,
        }
    }

    /// Presentation for a level using the configured thresholds.
    pub fn status(&self, level: f64) -> PoolStatus {
        PoolBand::with_thresholds(level, self.config.high_threshold, self.config.low_threshold)
            .status()
    }
}
