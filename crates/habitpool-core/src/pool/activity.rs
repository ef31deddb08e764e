//! Activity categories that drain or recharge the pool.

use serde::{Deserialize, Serialize};

/// Activities that drain drive capacity.
///
/// High-stimulation categories drain more than low-stimulation ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainActivity {
    SocialMedia,
    Gaming,
    Streaming,
    JunkFood,
    NewsScrolling,
    Shopping,
    /// Caller-supplied magnitude (positive number, subtracted)
    Custom(f64),
}

impl DrainActivity {
    /// Magnitude subtracted from the pool level
    pub fn impact(&self) -> f64 {
        match self {
            DrainActivity::SocialMedia => 15.0,
            DrainActivity::Gaming => 12.0,
            DrainActivity::Streaming => 10.0,
            DrainActivity::JunkFood => 8.0,
            DrainActivity::NewsScrolling => 6.0,
            DrainActivity::Shopping => 6.0,
            DrainActivity::Custom(magnitude) => magnitude.abs(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrainActivity::SocialMedia => "Social media",
            DrainActivity::Gaming => "Gaming",
            DrainActivity::Streaming => "Streaming",
            DrainActivity::JunkFood => "Junk food",
            DrainActivity::NewsScrolling => "News scrolling",
            DrainActivity::Shopping => "Online shopping",
            DrainActivity::Custom(_) => "Other drain",
        }
    }

    /// Parse a CLI/user-facing name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', ' '], "_").as_str() {
            "social_media" | "social" => Some(DrainActivity::SocialMedia),
            "gaming" | "games" => Some(DrainActivity::Gaming),
            "streaming" | "tv" => Some(DrainActivity::Streaming),
            "junk_food" | "junk" => Some(DrainActivity::JunkFood),
            "news" | "news_scrolling" => Some(DrainActivity::NewsScrolling),
            "shopping" => Some(DrainActivity::Shopping),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(DrainActivity::Custom),
        }
    }
}

/// Activities that recharge drive capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RechargeActivity {
    Exercise,
    Meditation,
    Outdoors,
    Reading,
    Connection,
    Nap,
    HabitCompleted,
    /// Caller-supplied magnitude (positive number, added)
    Custom(f64),
}

impl RechargeActivity {
    /// Magnitude added to the pool level
    pub fn boost(&self) -> f64 {
        match self {
            RechargeActivity::Exercise => 15.0,
            RechargeActivity::Meditation => 12.0,
            RechargeActivity::Outdoors => 10.0,
            RechargeActivity::Reading => 8.0,
            RechargeActivity::Connection => 8.0,
            RechargeActivity::Nap => 6.0,
            RechargeActivity::HabitCompleted => 5.0,
            RechargeActivity::Custom(magnitude) => magnitude.abs(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RechargeActivity::Exercise => "Exercise",
            RechargeActivity::Meditation => "Meditation",
            RechargeActivity::Outdoors => "Time outdoors",
            RechargeActivity::Reading => "Reading",
            RechargeActivity::Connection => "Real connection",
            RechargeActivity::Nap => "Nap",
            RechargeActivity::HabitCompleted => "Habit completed",
            RechargeActivity::Custom(_) => "Other recharge",
        }
    }

    /// Parse a CLI/user-facing name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', ' '], "_").as_str() {
            "exercise" | "workout" => Some(RechargeActivity::Exercise),
            "meditation" | "meditate" => Some(RechargeActivity::Meditation),
            "outdoors" | "nature" | "walk" => Some(RechargeActivity::Outdoors),
            "reading" | "read" => Some(RechargeActivity::Reading),
            "connection" | "friends" => Some(RechargeActivity::Connection),
            "nap" => Some(RechargeActivity::Nap),
            "habit" | "habit_completed" => Some(RechargeActivity::HabitCompleted),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(RechargeActivity::Custom),
        }
    }
}
