//! Subcommand implementations and the session plumbing they share.

pub mod coach;
pub mod config;
pub mod habit;
pub mod log;
pub mod pool;
pub mod reward;
pub mod streak;
pub mod trends;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use habitpool_core::{
    Config, JsonStore, PoolEngine, Store, StreakEngine, StreakResult, StreakScope, UserData,
    ValidationError,
};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// One command invocation: the loaded document, its store and the config.
pub struct Session {
    pub store: JsonStore,
    pub data: UserData,
    pub config: Config,
    pub now: DateTime<FixedOffset>,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let store = JsonStore::open_default()?;
        let data = store.load()?;
        tracing::debug!(
            path = %store.path().display(),
            habits = data.habits.len(),
            "user data loaded"
        );
        Ok(Self {
            store,
            data,
            config: Config::load_or_default(),
            now: Local::now().into(),
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn save(&self) -> CliResult {
        self.store.save(&self.data)?;
        Ok(())
    }

    /// Accept a habit id or a case-insensitive habit name.
    pub fn resolve_habit(&self, key: &str) -> Result<String, ValidationError> {
        self.data
            .habits
            .iter()
            .find(|h| h.id == key)
            .or_else(|| {
                self.data
                    .habits
                    .iter()
                    .find(|h| h.name.eq_ignore_ascii_case(key))
            })
            .map(|h| h.id.clone())
            .ok_or_else(|| ValidationError::UnknownHabit(key.to_string()))
    }

    /// Aggregate streak across all habits as of today.
    pub fn aggregate_streak(&self) -> StreakResult {
        StreakEngine::with_config(self.config.streak.clone()).compute(
            &StreakScope::All {
                habit_count: self.data.habits.len(),
            },
            &self.data.completions,
            self.today(),
        )
    }

    /// Run the morning reset if today's has not happened yet.
    ///
    /// Returns true when the stored pool changed.
    pub fn ensure_pool_current(&mut self, last_sleep_hours: Option<f64>) -> bool {
        let today = self.today();
        if self.data.pool.is_current(today) {
            return false;
        }
        self.refresh_streak();
        let engine = PoolEngine::with_config(self.config.pool.clone());
        let inputs = self.data.morning_inputs(today, last_sleep_hours);
        let proposed = engine.morning_reset(&self.data.pool, today, &inputs);
        let level = proposed.current_level;
        let committed = PoolEngine::commit_reset(&mut self.data.pool, proposed);
        if committed {
            self.data.record_pool_level(today, level);
        }
        committed
    }

    pub fn refresh_streak(&mut self) -> StreakResult {
        let result = self.aggregate_streak();
        self.data.refresh_streak_counters(&result);
        result
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
