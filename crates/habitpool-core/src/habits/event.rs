//! Habit and completion event records.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A habit the user is tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Daily target amount (e.g. 8 for "8 glasses")
    #[serde(default = "default_target")]
    pub target_amount: u32,
    /// Unit label for the target (e.g. "glasses", "minutes")
    #[serde(default)]
    pub unit: String,
    /// When the habit was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_target() -> u32 {
    1
}

impl Habit {
    /// Create a habit with a fresh id and a target of one per day.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            target_amount: default_target(),
            unit: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style target override.
    pub fn with_target(mut self, amount: u32, unit: impl Into<String>) -> Self {
        self.target_amount = amount;
        self.unit = unit.into();
        self
    }
}

/// A single entry in the append-only completion log.
///
/// The timestamp keeps the UTC offset of the device that recorded it, so the
/// local calendar date and hour are recoverable without knowing the reader's
/// time zone. A persisted entry with no timestamp is malformed; every engine
/// skips it instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub habit_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

impl CompletionEvent {
    /// A completed entry for `habit_id` at `timestamp`.
    pub fn done(habit_id: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            habit_id: habit_id.into(),
            timestamp: Some(timestamp),
            completed: true,
        }
    }

    /// An entry recording that the habit was attempted but not completed.
    pub fn missed(habit_id: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            habit_id: habit_id.into(),
            timestamp: Some(timestamp),
            completed: false,
        }
    }

    /// Local calendar date of the entry, `None` when malformed.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date_naive())
    }

    /// Local hour of day (0-23), `None` when malformed.
    pub fn local_hour(&self) -> Option<u32> {
        self.timestamp.map(|ts| ts.hour())
    }

    /// Local weekday, `None` when malformed.
    pub fn weekday(&self) -> Option<Weekday> {
        self.timestamp.map(|ts| ts.weekday())
    }

    /// Whether the entry can take part in any computation.
    pub fn is_well_formed(&self) -> bool {
        self.timestamp.is_some() && !self.habit_id.is_empty()
    }
}
