//! # Habitpool Core Library
//!
//! Behavioral modeling for a habit coach. Everything here is derived from an
//! append-only log of habit completion events plus a small persisted pool
//! state. The CLI binary is a thin presentation layer over the same library.
//!
//! ## Architecture
//!
//! - **Streak engine**: miss-tolerant consistency score over a trailing
//!   window, with current and best runs
//! - **Pool engine**: a bounded "drive capacity" level that resets each
//!   morning and moves with drain and recharge activities
//! - **Pattern analytics**: time-of-day, day-of-week, per-habit trend and
//!   pool/completion correlation, summarized into insights
//! - **Rewards**: gated, weighted-random reward messages and streak milestones
//! - **Storage**: whole-document JSON store and TOML configuration
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: streak and consistency metrics
//! - [`PoolEngine`]: pool state transitions
//! - [`PatternAnalyzer`]: analytics report assembly
//! - [`RewardSelector`] and [`RewardGate`]: reward messaging
//! - [`Store`]: persistence of the [`UserData`] document
//! - [`Coach`]: seam for the external coaching text generator

pub mod analytics;
pub mod coach;
pub mod error;
pub mod habits;
pub mod pool;
pub mod reward;
pub mod storage;
pub mod streak;

pub use analytics::{AnalyticsConfig, AnalyticsReport, Insight, PatternAnalyzer};
pub use coach::{Coach, CoachContext, ConversationTurn, Role};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use habits::{CompletionEvent, DayIndex, Habit};
pub use pool::{
    DrainActivity, MorningInputs, PoolBand, PoolConfig, PoolEngine, PoolState, PoolStatus,
    RechargeActivity,
};
pub use reward::{
    check_milestone, Milestone, Reward, RewardCategory, RewardConfig, RewardContext, RewardGate,
    RewardSelector,
};
pub use storage::{data_dir, Config, JsonStore, MemoryStore, Store, UserData};
pub use streak::{StreakConfig, StreakEngine, StreakResult, StreakScope, StreakStatus};
