//! Weighted-random reward message selection.
//!
//! Categories live in an explicit weight table; recency dampening is a pure
//! transform of that table, and a single function samples from it.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analytics::DayPart;

/// Reward message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardCategory {
    Acknowledgment,
    Identity,
    Pattern,
    Neuroscience,
    RareDelight,
}

impl RewardCategory {
    pub const ALL: [RewardCategory; 5] = [
        RewardCategory::Acknowledgment,
        RewardCategory::Identity,
        RewardCategory::Pattern,
        RewardCategory::Neuroscience,
        RewardCategory::RareDelight,
    ];

    fn templates(&self) -> &'static [&'static str] {
        match self {
            RewardCategory::Acknowledgment => &[
                "Done. Nice work.",
                "Logged. That counts.",
                "Another one in the books.",
                "You showed up today.",
            ],
            RewardCategory::Identity => &[
                "This is what a consistent person does.",
                "You're becoming someone who follows through.",
                "Small votes for the person you want to be.",
            ],
            RewardCategory::Pattern => &[
                "{streak} days running on {habit}.",
                "Your {time} routine is paying off.",
                "{habit} again. {streak} days and counting.",
            ],
            RewardCategory::Neuroscience => &[
                "Each repetition strengthens the neural pathway behind this habit.",
                "Finishing what you start releases a little dopamine. Enjoy it.",
            ],
            RewardCategory::RareDelight => &[
                "Rare drop! You found a golden completion.",
                "Plot twist: you're on fire today.",
            ],
        }
    }
}

/// Variables substituted into pattern templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardContext {
    pub streak: u32,
    pub habit_name: String,
    pub time_of_day: Option<DayPart>,
}

impl RewardContext {
    fn render(&self, template: &str) -> String {
        let time = self.time_of_day.map_or("daily", |p| p.label());
        template
            .replace("{streak}", &self.streak.to_string())
            .replace("{habit}", &self.habit_name)
            .replace("{time}", time)
    }
}

/// Selected reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub category: RewardCategory,
    pub message: String,
}

/// Category weights in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    entries: Vec<(RewardCategory, f64)>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (RewardCategory::Acknowledgment, 55.0),
                (RewardCategory::Identity, 20.0),
                (RewardCategory::Pattern, 15.0),
                (RewardCategory::Neuroscience, 7.0),
                (RewardCategory::RareDelight, 3.0),
            ],
        }
    }
}

impl WeightTable {
    pub fn weight(&self, category: RewardCategory) -> f64 {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0.0, |(_, w)| *w)
    }

    pub fn entries(&self) -> &[(RewardCategory, f64)] {
        &self.entries
    }

    /// Halve the weight of every category shown in the last `window` entries
    /// of `recent` (oldest first).
    pub fn dampened(&self, recent: &[RewardCategory], window: usize) -> Self {
        let start = recent.len().saturating_sub(window);
        let recent = &recent[start..];
        Self {
            entries: self
                .entries
                .iter()
                .map(|(category, weight)| {
                    if recent.contains(category) {
                        (*category, weight / 2.0)
                    } else {
                        (*category, *weight)
                    }
                })
                .collect(),
        }
    }

    /// Draw one category. Falls back to acknowledgment if every weight is 0.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> RewardCategory {
        match WeightedIndex::new(self.entries.iter().map(|(_, w)| *w)) {
            Ok(dist) => self.entries[dist.sample(rng)].0,
            Err(_) => RewardCategory::Acknowledgment,
        }
    }
}

/// Stateless reward selector.
#[derive(Debug, Clone)]
pub struct RewardSelector {
    table: WeightTable,
    recent_window: usize,
}

impl Default for RewardSelector {
    fn default() -> Self {
        Self {
            table: WeightTable::default(),
            recent_window: 3,
        }
    }
}

impl RewardSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_window(recent_window: usize) -> Self {
        Self {
            recent_window,
            ..Self::default()
        }
    }

    /// Pick a category (with recency dampening) and a message from it.
    pub fn select<R: Rng>(
        &self,
        ctx: &RewardContext,
        recent: &[RewardCategory],
        rng: &mut R,
    ) -> Reward {
        let category = self.table.dampened(recent, self.recent_window).sample(rng);
        let templates = category.templates();
        let template = templates[rng.gen_range(0..templates.len())];
        Reward {
            category,
            message: ctx.render(template),
        }
    }
}
