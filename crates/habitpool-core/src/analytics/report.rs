//! Report assembly and insight synthesis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::correlation::{analyze_pool_correlation, PoolCorrelation};
use super::day_of_week::{analyze_day_of_week, weekday_name, DayOfWeekAnalysis};
use super::habit_performance::{analyze_habit, HabitPerformance};
use super::math::percent;
use super::time_of_day::{analyze_time_of_day, TimeOfDayAnalysis};
use crate::habits::{CompletionEvent, DayIndex, Habit};

/// Sample-size gates and output limits for the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub min_events_time_of_day: u32,
    pub min_events_day_of_week: u32,
    pub min_events_per_habit: u32,
    pub min_hour_samples: u32,
    pub min_pool_history: u32,
    pub min_aligned_points: u32,
    pub max_insights: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_events_time_of_day: 14,
            min_events_day_of_week: 21,
            min_events_per_habit: 7,
            min_hour_samples: 3,
            min_pool_history: 14,
            min_aligned_points: 10,
            max_insights: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Timing,
    Weekly,
    Pool,
    Praise,
    Attention,
}

/// A short statement derived from a statistical pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub icon: String,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(
        category: InsightCategory,
        icon: &str,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            icon: icon.to_string(),
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_completions: u32,
    pub active_days: u32,
    pub active_habits: u32,
    pub skipped_entries: u32,
}

/// Full analytics report. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub generated_for: NaiveDate,
    pub summary: ReportSummary,
    pub time_of_day: TimeOfDayAnalysis,
    pub day_of_week: DayOfWeekAnalysis,
    pub habits: Vec<HabitPerformance>,
    pub correlation: PoolCorrelation,
    /// Id of the habit with the highest week rate among those with enough data
    pub best_habit: Option<String>,
    /// Ids of habits flagged as needing attention
    pub needs_attention: Vec<String>,
    pub insights: Vec<Insight>,
}

impl AnalyticsReport {
    pub fn habit(&self, habit_id: &str) -> Option<&HabitPerformance> {
        self.habits.iter().find(|h| h.habit_id == habit_id)
    }

    pub fn best_habit_performance(&self) -> Option<&HabitPerformance> {
        self.best_habit.as_deref().and_then(|id| self.habit(id))
    }
}

/// Pattern analytics engine.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: AnalyticsConfig,
}

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Run every analysis block over the full history and assemble a report.
    pub fn analyze(
        &self,
        log: &[CompletionEvent],
        habits: &[Habit],
        pool_history: &BTreeMap<NaiveDate, f64>,
        today: NaiveDate,
    ) -> AnalyticsReport {
        let cfg = &self.config;
        let index = DayIndex::build(log);

        let time_of_day =
            analyze_time_of_day(log, cfg.min_events_time_of_day, cfg.min_hour_samples);
        let day_of_week = analyze_day_of_week(log, cfg.min_events_day_of_week);
        let habit_perf: Vec<HabitPerformance> = habits
            .iter()
            .map(|h| analyze_habit(h, log, &index, today, cfg.min_events_per_habit))
            .collect();
        let correlation = analyze_pool_correlation(
            pool_history,
            &index,
            habits.len(),
            cfg.min_pool_history,
            cfg.min_aligned_points,
        );

        let summary = Self::summarize(log, &index);

        // Ties keep the earlier habit
        let best_habit = habit_perf
            .iter()
            .filter(|h| h.has_enough_data)
            .fold(None::<&HabitPerformance>, |best, h| match best {
                Some(b) if b.week_rate >= h.week_rate => Some(b),
                _ => Some(h),
            })
            .map(|h| h.habit_id.clone());
        let needs_attention: Vec<String> = habit_perf
            .iter()
            .filter(|h| h.has_enough_data && h.needs_attention)
            .map(|h| h.habit_id.clone())
            .collect();

        let mut report = AnalyticsReport {
            generated_for: today,
            summary,
            time_of_day,
            day_of_week,
            habits: habit_perf,
            correlation,
            best_habit,
            needs_attention,
            insights: Vec::new(),
        };
        report.insights = self.build_insights(&report);

        tracing::debug!(
            habits = report.habits.len(),
            insights = report.insights.len(),
            "analytics report assembled"
        );
        report
    }

    fn summarize(log: &[CompletionEvent], index: &DayIndex) -> ReportSummary {
        let completed = || log.iter().filter(|e| e.is_well_formed() && e.completed);
        let active_habits: HashSet<&str> = completed().map(|e| e.habit_id.as_str()).collect();
        ReportSummary {
            total_completions: completed().count() as u32,
            active_days: index.active_days() as u32,
            active_habits: active_habits.len() as u32,
            skipped_entries: index.skipped() as u32,
        }
    }

    /// Insights in fixed priority order, truncated to `max_insights`.
    fn build_insights(&self, report: &AnalyticsReport) -> Vec<Insight> {
        let mut insights = Vec::new();

        let tod = &report.time_of_day;
        if let (true, Some(part)) = (tod.has_enough_data, tod.best_part) {
            let stat = tod.part(part);
            let mut message = if tod.has_misses {
                format!(
                    "You complete {:.0}% of your habits in the {}.",
                    stat.map_or(0.0, |p| p.rate),
                    part.label()
                )
            } else {
                let total: u32 = tod.day_parts.iter().map(|p| p.completed).sum();
                format!(
                    "{:.0}% of your completions happen in the {}.",
                    percent(stat.map_or(0, |p| p.completed), total),
                    part.label()
                )
            };
            if let Some(hour) = tod.best_hour {
                if tod.has_misses {
                    message.push_str(&format!(
                        " Your strongest hour is {:02}:00 ({:.0}%).",
                        hour, tod.best_hour_rate
                    ));
                } else {
                    message.push_str(&format!(" Your busiest hour is {:02}:00.", hour));
                }
            }
            insights.push(Insight::new(
                InsightCategory::Timing,
                part.icon(),
                format!("You're a {} person", part.label()),
                message,
            ));
        }

        let dow = &report.day_of_week;
        if dow.has_enough_data {
            if dow.weekend_warrior {
                insights.push(Insight::new(
                    InsightCategory::Weekly,
                    "calendar",
                    "Weekend warrior",
                    format!(
                        "Weekends run at {:.0}% vs {:.0}% on weekdays. Shrink weekday habits so they fit busy days.",
                        dow.weekend_average, dow.weekday_average
                    ),
                ));
            } else if dow.weekday_dipper {
                insights.push(Insight::new(
                    InsightCategory::Weekly,
                    "calendar",
                    "Weekday rhythm",
                    format!(
                        "Weekdays run at {:.0}% vs {:.0}% on weekends. Anchor weekend habits to a fixed time.",
                        dow.weekday_average, dow.weekend_average
                    ),
                ));
            } else if let Some(day) = dow.best_day {
                let stat = dow.days.iter().find(|d| d.weekday == day);
                let message = if dow.has_misses {
                    format!(
                        "You hit {:.0}% of your habits on {}s.",
                        stat.map_or(0.0, |d| d.rate),
                        weekday_name(day)
                    )
                } else {
                    let total: u32 = dow.days.iter().map(|d| d.completed).sum();
                    format!(
                        "{:.0}% of your completions land on {}s.",
                        percent(stat.map_or(0, |d| d.completed), total),
                        weekday_name(day)
                    )
                };
                insights.push(Insight::new(
                    InsightCategory::Weekly,
                    "calendar",
                    format!("{}s are your strongest", weekday_name(day)),
                    message,
                ));
            }
        }

        let corr = &report.correlation;
        if corr.has_enough_data && corr.pool_matters {
            insights.push(Insight::new(
                InsightCategory::Pool,
                "battery",
                "Your drive pool matters",
                format!(
                    "On high-pool days you complete {:.0}% of habits vs {:.0}% on low days. Protect your recharge time.",
                    corr.high_pool_rate, corr.low_pool_rate
                ),
            ));
        }

        if let Some(best) = report.best_habit_performance().filter(|b| b.week_rate > 0.0) {
            insights.push(Insight::new(
                InsightCategory::Praise,
                "trophy",
                format!("{} is sticking", best.habit_name),
                format!(
                    "{:.0}% this week with a {}-day streak.",
                    best.week_rate, best.current_streak
                ),
            ));
        }

        if let Some(weak) = report
            .needs_attention
            .first()
            .and_then(|id| report.habit(id))
        {
            insights.push(Insight::new(
                InsightCategory::Attention,
                "alert",
                format!("{} needs attention", weak.habit_name),
                format!(
                    "Down {:.0} points over the last two weeks. Try making it smaller.",
                    weak.trend.abs()
                ),
            ));
        }

        insights.truncate(self.config.max_insights);
        insights
    }
}
