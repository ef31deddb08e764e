//! Pool level vs same-day completion rate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::math::{mean, pearson, percent};
use crate::habits::DayIndex;

pub const HIGH_POOL_LEVEL: f64 = 70.0;
pub const LOW_POOL_LEVEL: f64 = 50.0;

/// Impact in points above which the pool is considered to matter.
const POOL_MATTERS_IMPACT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    #[default]
    None,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r >= 0.7 {
            CorrelationStrength::Strong
        } else if r >= 0.4 {
            CorrelationStrength::Moderate
        } else if r >= 0.2 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::None
        }
    }
}

/// One aligned day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedDay {
    pub date: NaiveDate,
    pub pool_level: f64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolCorrelation {
    pub has_enough_data: bool,
    pub history_days: u32,
    pub aligned_points: u32,
    /// History days dropped because they had no completion entries
    pub dropped_days: u32,
    pub high_pool_days: u32,
    pub low_pool_days: u32,
    pub high_pool_rate: f64,
    pub low_pool_rate: f64,
    /// `high_pool_rate - low_pool_rate`; 0 when either group is empty
    pub pool_impact: f64,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub pool_matters: bool,
}

/// Pair each pool-history day with that day's completion rate.
///
/// Days without any completion entry are dropped rather than counted as 0%:
/// an empty day usually means the app was not opened, not that every habit
/// was skipped. The rate is distinct habits completed over `habit_count`, or
/// over the habits seen that day when `habit_count` is 0.
pub fn align_days(
    pool_history: &BTreeMap<NaiveDate, f64>,
    index: &DayIndex,
    habit_count: usize,
) -> Vec<AlignedDay> {
    pool_history
        .iter()
        .filter(|(date, _)| index.has_entries(**date))
        .map(|(date, level)| {
            let denominator = if habit_count > 0 {
                habit_count
            } else {
                index.seen_habits(*date)
            };
            // Completions of habits no longer tracked are capped at the tracked count
            let completed = index.completed_habits(*date).min(denominator);
            AlignedDay {
                date: *date,
                pool_level: *level,
                completion_rate: percent(completed as u32, denominator as u32),
            }
        })
        .collect()
}

/// Correlate pool level with completion rate.
pub fn analyze_pool_correlation(
    pool_history: &BTreeMap<NaiveDate, f64>,
    index: &DayIndex,
    habit_count: usize,
    min_history: u32,
    min_points: u32,
) -> PoolCorrelation {
    let history_days = pool_history.len() as u32;
    if history_days < min_history {
        tracing::debug!(history_days, min_history, "pool correlation gated on history");
        return PoolCorrelation {
            history_days,
            ..Default::default()
        };
    }

    let aligned = align_days(pool_history, index, habit_count);
    let aligned_points = aligned.len() as u32;
    let dropped_days = history_days - aligned_points;
    if aligned_points < min_points {
        tracing::debug!(aligned_points, min_points, "pool correlation gated on aligned points");
        return PoolCorrelation {
            history_days,
            aligned_points,
            dropped_days,
            ..Default::default()
        };
    }

    let high: Vec<f64> = aligned
        .iter()
        .filter(|d| d.pool_level >= HIGH_POOL_LEVEL)
        .map(|d| d.completion_rate)
        .collect();
    let low: Vec<f64> = aligned
        .iter()
        .filter(|d| d.pool_level < LOW_POOL_LEVEL)
        .map(|d| d.completion_rate)
        .collect();

    let high_pool_rate = mean(&high);
    let low_pool_rate = mean(&low);
    let pool_impact = if high.is_empty() || low.is_empty() {
        0.0
    } else {
        high_pool_rate - low_pool_rate
    };

    let pairs: Vec<(f64, f64)> = aligned
        .iter()
        .map(|d| (d.pool_level, d.completion_rate))
        .collect();
    let coefficient = pearson(&pairs);

    PoolCorrelation {
        has_enough_data: true,
        history_days,
        aligned_points,
        dropped_days,
        high_pool_days: high.len() as u32,
        low_pool_days: low.len() as u32,
        high_pool_rate,
        low_pool_rate,
        pool_impact,
        coefficient,
        strength: CorrelationStrength::from_coefficient(coefficient),
        pool_matters: pool_impact > POOL_MATTERS_IMPACT,
    }
}
