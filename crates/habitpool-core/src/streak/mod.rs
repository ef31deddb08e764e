//! Streak and consistency tracking.

mod engine;
mod runs;

pub use engine::{
    HitRule, StreakConfig, StreakEngine, StreakResult, StreakScope, StreakStatus, MAX_WINDOW_DAYS,
};
pub use runs::{current_run, longest_run};
