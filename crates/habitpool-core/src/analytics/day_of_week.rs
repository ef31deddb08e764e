//! Day-of-week completion patterns.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::math::{mean, percent};
use crate::habits::CompletionEvent;

/// Points by which one side of the week must lead to be flagged.
const WEEK_SPLIT_MARGIN: f64 = 10.0;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStat {
    pub weekday: Weekday,
    pub samples: u32,
    pub completed: u32,
    pub rate: f64,
}

/// Day-of-week analysis block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekAnalysis {
    pub has_enough_data: bool,
    pub total_events: u32,
    /// False when the log holds no missed entries; days are then ranked by
    /// completion count
    pub has_misses: bool,
    /// Monday first
    pub days: Vec<WeekdayStat>,
    pub weekday_average: f64,
    pub weekend_average: f64,
    pub weekend_warrior: bool,
    pub weekday_dipper: bool,
    pub best_day: Option<Weekday>,
    pub worst_day: Option<Weekday>,
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Per-weekday completion rates and the weekday/weekend split.
///
/// Averages are the mean of the days on each side that have samples.
pub fn analyze_day_of_week(log: &[CompletionEvent], min_events: u32) -> DayOfWeekAnalysis {
    let mut days: Vec<WeekdayStat> = WEEK
        .iter()
        .map(|weekday| WeekdayStat {
            weekday: *weekday,
            samples: 0,
            completed: 0,
            rate: 0.0,
        })
        .collect();

    let mut total_events = 0u32;
    let mut has_misses = false;
    for event in log.iter().filter(|e| e.is_well_formed()) {
        let Some(weekday) = event.weekday() else {
            continue;
        };
        total_events += 1;
        let stat = &mut days[weekday.num_days_from_monday() as usize];
        stat.samples += 1;
        if event.completed {
            stat.completed += 1;
        } else {
            has_misses = true;
        }
    }

    if total_events < min_events {
        tracing::debug!(total_events, min_events, "day-of-week analysis gated");
        return DayOfWeekAnalysis {
            total_events,
            ..Default::default()
        };
    }

    for stat in &mut days {
        stat.rate = percent(stat.completed, stat.samples);
    }

    let side_rates = |weekend: bool| -> Vec<f64> {
        days.iter()
            .filter(|d| d.samples > 0 && is_weekend(d.weekday) == weekend)
            .map(|d| d.rate)
            .collect()
    };
    let weekday_average = mean(&side_rates(false));
    let weekend_average = mean(&side_rates(true));

    let key = |d: &WeekdayStat| if has_misses { d.rate } else { d.completed as f64 };
    let observed = || days.iter().filter(|d| d.samples > 0);
    let best_day = observed()
        .fold(None::<&WeekdayStat>, |best, d| match best {
            Some(b) if key(b) >= key(d) => Some(b),
            _ => Some(d),
        })
        .map(|d| d.weekday);
    let worst_day = observed()
        .fold(None::<&WeekdayStat>, |worst, d| match worst {
            Some(w) if key(w) <= key(d) => Some(w),
            _ => Some(d),
        })
        .map(|d| d.weekday);

    DayOfWeekAnalysis {
        has_enough_data: true,
        total_events,
        has_misses,
        weekday_average,
        weekend_average,
        weekend_warrior: weekend_average - weekday_average > WEEK_SPLIT_MARGIN,
        weekday_dipper: weekday_average - weekend_average > WEEK_SPLIT_MARGIN,
        best_day,
        worst_day,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime};

    /// Events on the first occurrence of `weekday` in a fixed reference week.
    fn events_on(weekday: Weekday, total: u32, completed: u32) -> Vec<CompletionEvent> {
        // 2026-03-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let date = monday + Duration::days(weekday.num_days_from_monday() as i64);
        let ts = date
            .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
            .and_local_timezone(FixedOffset::east_opt(0).unwrap())
            .unwrap();
        (0..total)
            .map(|i| CompletionEvent {
                habit_id: format!("h{i}"),
                timestamp: Some(ts),
                completed: i < completed,
            })
            .collect()
    }

    #[test]
    fn test_gated_below_minimum() {
        let log = events_on(Weekday::Mon, 20, 20);
        let analysis = analyze_day_of_week(&log, 21);
        assert!(!analysis.has_enough_data);
        assert!(!analysis.weekend_warrior);
    }

    #[test]
    fn test_weekday_dipper() {
        let mut log = Vec::new();
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed] {
            log.extend(events_on(day, 10, 5));
        }
        log.extend(events_on(Weekday::Sat, 10, 2));

        let analysis = analyze_day_of_week(&log, 21);
        assert!(analysis.has_enough_data);
        assert_eq!(analysis.weekday_average, 50.0);
        assert_eq!(analysis.weekend_average, 20.0);
        assert!(analysis.weekday_dipper);
        assert!(!analysis.weekend_warrior);
        assert_eq!(analysis.worst_day, Some(Weekday::Sat));
        assert_eq!(analysis.best_day, Some(Weekday::Mon));
    }

    #[test]
    fn test_days_without_samples_excluded_from_average() {
        let mut log = events_on(Weekday::Thu, 20, 16);
        log.extend(events_on(Weekday::Sun, 4, 3));
        let analysis = analyze_day_of_week(&log, 21);
        assert_eq!(analysis.weekday_average, 80.0);
        assert_eq!(analysis.weekend_average, 75.0);
        assert!(!analysis.weekend_warrior && !analysis.weekday_dipper);
    }

    #[test]
    fn test_completions_only_rank_by_volume() {
        let mut log = events_on(Weekday::Mon, 5, 5);
        log.extend(events_on(Weekday::Thu, 12, 12));
        log.extend(events_on(Weekday::Sat, 6, 6));

        let analysis = analyze_day_of_week(&log, 21);
        assert!(analysis.has_enough_data);
        assert!(!analysis.has_misses);
        assert_eq!(analysis.best_day, Some(Weekday::Thu));
        assert_eq!(analysis.worst_day, Some(Weekday::Mon));
        assert!(!analysis.weekend_warrior && !analysis.weekday_dipper);
    }
}
