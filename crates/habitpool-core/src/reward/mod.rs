//! Reward messaging: whether to show one, which category, and milestones.

mod gate;
mod milestone;
mod selector;

pub use gate::{RewardConfig, RewardGate};
pub use milestone::{check_milestone, Milestone, MILESTONE_LADDER};
pub use selector::{Reward, RewardCategory, RewardContext, RewardSelector, WeightTable};
