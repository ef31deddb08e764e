//! Input snapshot and trait seam for the conversational coach.
//!
//! The text generator itself lives outside this crate. The core only builds
//! the snapshot a coach sees and the conversation turns it replies to.

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsReport;
use crate::error::Result;
use crate::pool::{PoolBand, PoolStatus};
use crate::streak::StreakResult;

/// What the coach knows about the user right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachContext {
    pub pool_level: f64,
    pub pool_band: PoolBand,
    pub consistency_score: u8,
    pub current_streak: u32,
    /// Name of the habit with the best weekly rate
    pub best_habit: Option<String>,
    /// Message of the highest-priority insight
    pub top_insight: Option<String>,
}

impl CoachContext {
    pub fn new(
        pool_level: f64,
        pool_status: &PoolStatus,
        streak: &StreakResult,
        report: &AnalyticsReport,
    ) -> Self {
        Self {
            pool_level,
            pool_band: pool_status.band,
            consistency_score: streak.consistency_score,
            current_streak: streak.current_run,
            best_habit: report
                .best_habit_performance()
                .map(|h| h.habit_name.clone()),
            top_insight: report.insights.first().map(|i| i.message.clone()),
        }
    }

    /// Plain-text block suitable for a system prompt.
    pub fn to_prompt_block(&self) -> String {
        let band = match self.pool_band {
            PoolBand::High => "high",
            PoolBand::Moderate => "moderate",
            PoolBand::Low => "low",
        };
        let mut lines = vec![
            format!("Pool level: {:.0}/100 ({band})", self.pool_level),
            format!("Consistency: {}%", self.consistency_score),
            format!("Current streak: {} days", self.current_streak),
        ];
        if let Some(habit) = &self.best_habit {
            lines.push(format!("Strongest habit: {habit}"));
        }
        if let Some(insight) = &self.top_insight {
            lines.push(format!("Key insight: {insight}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Coach,
}

/// One message in a coaching conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn coach(content: impl Into<String>) -> Self {
        Self {
            role: Role::Coach,
            content: content.into(),
        }
    }
}

/// A conversational coach. Implementations supply the text generation.
pub trait Coach: Send + Sync {
    /// Produce the next coach message for `history` (oldest first).
    fn reply(&self, history: &[ConversationTurn], context: &CoachContext) -> Result<String>;
}
