//! Decides whether a reward is shown after a completion.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reward gate and recency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// The first N completions of a day always show a reward
    pub always_show_first: u32,
    /// Probability of showing a reward after that
    pub show_probability: f64,
    /// Every Nth lifetime completion always shows a reward
    pub every_nth_lifetime: u64,
    /// How many recently shown categories are dampened
    pub recent_window: usize,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            always_show_first: 3,
            show_probability: 0.6,
            every_nth_lifetime: 10,
            recent_window: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RewardGate {
    config: RewardConfig,
}

impl RewardGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RewardConfig) -> Self {
        Self { config }
    }

    /// `completions_today` and `lifetime_completions` include the completion
    /// that was just logged (both are 1-based counts).
    pub fn should_show<R: Rng>(
        &self,
        completions_today: u32,
        lifetime_completions: u64,
        rng: &mut R,
    ) -> bool {
        let nth = self.config.every_nth_lifetime;
        if nth > 0 && lifetime_completions > 0 && lifetime_completions % nth == 0 {
            return true;
        }
        if completions_today <= self.config.always_show_first {
            return true;
        }
        let p = self.config.show_probability;
        if p.is_nan() {
            return false;
        }
        rng.gen_bool(p.clamp(0.0, 1.0))
    }
}
