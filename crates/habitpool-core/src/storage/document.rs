//! The single serializable user document.
//!
//! Callers mutate the document in memory and persist the whole thing through
//! a [`Store`](super::Store); there are no partial writes.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, ValidationError};
use crate::habits::{CompletionEvent, DayIndex, Habit};
use crate::pool::{MorningInputs, PoolState};
use crate::reward::RewardCategory;
use crate::streak::StreakResult;

/// How many recently shown reward categories are kept.
pub const MAX_RECENT_REWARDS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub habits: Vec<Habit>,
    pub completions: Vec<CompletionEvent>,
    pub pool: PoolState,
    /// Latest pool level recorded for each day
    pub pool_history: BTreeMap<NaiveDate, f64>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub lifetime_completions: u64,
    pub unlocked_milestones: Vec<u32>,
    /// Oldest first
    pub recent_rewards: Vec<RewardCategory>,
}

impl UserData {
    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    fn require_habit(&self, habit_id: &str) -> Result<&Habit> {
        self.habit(habit_id)
            .ok_or_else(|| ValidationError::UnknownHabit(habit_id.to_string()).into())
    }

    pub fn add_habit(&mut self, habit: Habit) -> Result<&Habit> {
        if habit.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "habit name cannot be empty".into(),
            }
            .into());
        }
        if habit.target_amount == 0 {
            return Err(ValidationError::InvalidValue {
                field: "target_amount".into(),
                message: "target must be at least 1".into(),
            }
            .into());
        }
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Delete a habit and every completion event that belongs to it.
    ///
    /// Returns the removed habit and the number of events removed with it.
    pub fn delete_habit(&mut self, habit_id: &str) -> Result<(Habit, usize)> {
        let pos = self
            .habits
            .iter()
            .position(|h| h.id == habit_id)
            .ok_or_else(|| ValidationError::UnknownHabit(habit_id.to_string()))?;
        let habit = self.habits.remove(pos);

        let before = self.completions.len();
        self.completions.retain(|e| e.habit_id != habit_id);
        let removed = before - self.completions.len();

        tracing::info!(habit_id, removed, "habit deleted");
        Ok((habit, removed))
    }

    /// Append a completed entry for `habit_id`.
    pub fn log_completion(
        &mut self,
        habit_id: &str,
        at: DateTime<FixedOffset>,
    ) -> Result<&CompletionEvent> {
        self.require_habit(habit_id)?;
        self.completions.push(CompletionEvent::done(habit_id, at));
        self.lifetime_completions += 1;
        Ok(&self.completions[self.completions.len() - 1])
    }

    /// Remove the most recent entry for `habit_id` on `date`.
    pub fn undo_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<CompletionEvent> {
        self.require_habit(habit_id)?;
        let pos = self
            .completions
            .iter()
            .rposition(|e| e.habit_id == habit_id && e.local_date() == Some(date))
            .ok_or_else(|| ValidationError::NothingToUndo {
                habit_id: habit_id.to_string(),
                date,
            })?;
        let event = self.completions.remove(pos);
        if event.completed {
            self.lifetime_completions = self.lifetime_completions.saturating_sub(1);
        }
        Ok(event)
    }

    /// Completed entries on `date`, across all habits.
    pub fn completions_on(&self, date: NaiveDate) -> u32 {
        self.completions
            .iter()
            .filter(|e| e.completed && e.local_date() == Some(date))
            .count() as u32
    }

    /// Whether every habit was completed on the day before `today`.
    pub fn prior_day_complete(&self, today: NaiveDate) -> bool {
        if self.habits.is_empty() {
            return false;
        }
        let yesterday = today - Duration::days(1);
        let index = DayIndex::build(&self.completions);
        self.habits
            .iter()
            .all(|h| index.is_completed(&h.id, yesterday))
    }

    /// Inputs for the pool's morning reset derived from the document.
    pub fn morning_inputs(&self, today: NaiveDate, last_sleep_hours: Option<f64>) -> MorningInputs {
        MorningInputs {
            streak_days: self.current_streak,
            prior_day_complete: self.prior_day_complete(today),
            last_sleep_hours,
        }
    }

    /// Store a new pool state and record its level for `date`.
    pub fn set_pool(&mut self, state: PoolState, date: NaiveDate) {
        self.record_pool_level(date, state.current_level);
        self.pool = state;
    }

    pub fn record_pool_level(&mut self, date: NaiveDate, level: f64) {
        self.pool_history.insert(date, level);
    }

    pub fn push_recent_reward(&mut self, category: RewardCategory) {
        self.recent_rewards.push(category);
        let excess = self.recent_rewards.len().saturating_sub(MAX_RECENT_REWARDS);
        self.recent_rewards.drain(..excess);
    }

    /// Returns false when the milestone was already unlocked.
    pub fn unlock_milestone(&mut self, days: u32) -> bool {
        if self.unlocked_milestones.contains(&days) {
            return false;
        }
        self.unlocked_milestones.push(days);
        self.unlocked_milestones.sort_unstable();
        true
    }

    /// Cache the aggregate streak counters from a fresh computation.
    pub fn refresh_streak_counters(&mut self, result: &StreakResult) {
        self.current_streak = result.current_run;
        self.best_streak = self.best_streak.max(result.best_run);
    }
}
