//! Day-bucketed view over the completion log.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use super::event::CompletionEvent;

#[derive(Debug, Clone, Default)]
struct DayBucket {
    completed: HashSet<String>,
    seen: HashSet<String>,
    entries: u32,
}

/// Index of the log keyed by local calendar date.
///
/// Built once per computation; malformed entries are skipped.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    days: BTreeMap<NaiveDate, DayBucket>,
    skipped: usize,
}

impl DayIndex {
    pub fn build(log: &[CompletionEvent]) -> Self {
        let mut index = Self::default();
        for event in log {
            let Some(date) = event.local_date().filter(|_| event.is_well_formed()) else {
                index.skipped += 1;
                continue;
            };
            let bucket = index.days.entry(date).or_default();
            bucket.entries += 1;
            bucket.seen.insert(event.habit_id.clone());
            if event.completed {
                bucket.completed.insert(event.habit_id.clone());
            }
        }
        if index.skipped > 0 {
            tracing::debug!(skipped = index.skipped, "skipped malformed completion entries");
        }
        index
    }

    /// True when `habit_id` has at least one completed entry on `date`.
    pub fn is_completed(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.days
            .get(&date)
            .is_some_and(|b| b.completed.contains(habit_id))
    }

    /// Number of distinct habits completed on `date`.
    pub fn completed_habits(&self, date: NaiveDate) -> usize {
        self.days.get(&date).map_or(0, |b| b.completed.len())
    }

    /// Number of distinct habits with any entry on `date`.
    pub fn seen_habits(&self, date: NaiveDate) -> usize {
        self.days.get(&date).map_or(0, |b| b.seen.len())
    }

    /// Whether any well-formed entry exists on `date`.
    pub fn has_entries(&self, date: NaiveDate) -> bool {
        self.days.get(&date).is_some_and(|b| b.entries > 0)
    }

    /// Earliest date with an entry, optionally restricted to one habit.
    pub fn first_day(&self, habit_id: Option<&str>) -> Option<NaiveDate> {
        match habit_id {
            None => self.days.keys().next().copied(),
            Some(id) => self
                .days
                .iter()
                .find(|(_, b)| b.seen.contains(id))
                .map(|(date, _)| *date),
        }
    }

    /// Dates that have at least one completed entry.
    pub fn active_days(&self) -> usize {
        self.days.values().filter(|b| !b.completed.is_empty()).count()
    }

    /// Number of malformed entries that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn at(day: u32, hour: u32) -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 5, day, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_index_groups_by_day() {
        let log = vec![
            CompletionEvent::done("a", at(1, 8)),
            CompletionEvent::done("a", at(1, 20)),
            CompletionEvent::done("b", at(1, 9)),
            CompletionEvent::missed("c", at(1, 9)),
            CompletionEvent::done("a", at(3, 9)),
        ];
        let index = DayIndex::build(&log);
        let d1 = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();

        assert_eq!(index.completed_habits(d1), 2);
        assert_eq!(index.seen_habits(d1), 3);
        assert!(index.is_completed("a", d1));
        assert!(!index.is_completed("c", d1));
        assert!(!index.has_entries(d2));
        assert_eq!(index.active_days(), 2);
        assert_eq!(index.first_day(Some("a")), Some(d1));
    }

    #[test]
    fn test_index_skips_malformed() {
        let log = vec![
            CompletionEvent {
                habit_id: "a".into(),
                timestamp: None,
                completed: true,
            },
            CompletionEvent::done("", at(2, 9)),
            CompletionEvent::done("a", at(2, 9)),
        ];
        let index = DayIndex::build(&log);
        assert_eq!(index.skipped(), 2);
        assert_eq!(index.active_days(), 1);
    }
}
