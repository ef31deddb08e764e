//! Pattern analytics over the full completion history.
//!
//! Each analysis block is gated by its own sample-size threshold and reports
//! `has_enough_data`; callers must check it before trusting a statistic. The
//! blocks are combined into an [`AnalyticsReport`] with a ranked insight list:
//!
//! - **Time of day**: hourly bins rolled up into morning/afternoon/evening/night
//! - **Day of week**: per-weekday rates and the weekday/weekend split
//! - **Per habit**: 7/30-day rates, 15-day half trend, streaks, resistance
//! - **Pool correlation**: completion rate on high vs low pool days, Pearson r
//!
//! Values are accumulated unrounded; use [`round1`] only for presentation.

mod correlation;
mod day_of_week;
mod habit_performance;
mod math;
mod report;
mod time_of_day;

pub use correlation::{
    align_days, analyze_pool_correlation, AlignedDay, CorrelationStrength, PoolCorrelation,
    HIGH_POOL_LEVEL, LOW_POOL_LEVEL,
};
pub use day_of_week::{
    analyze_day_of_week, is_weekend, weekday_name, DayOfWeekAnalysis, WeekdayStat,
};
pub use habit_performance::{
    analyze_habit, daily_series, HabitPerformance, ResistanceLevel, TrendDirection,
    MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};
pub use math::{mean, pearson, percent, round1};
pub use report::{
    AnalyticsConfig, AnalyticsReport, Insight, InsightCategory, PatternAnalyzer, ReportSummary,
};
pub use time_of_day::{analyze_time_of_day, DayPart, DayPartStat, HourBin, TimeOfDayAnalysis};
