//! Pool level bands and their presentation.

use serde::{Deserialize, Serialize};

/// Pool level band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolBand {
    /// 70-100
    High,
    /// 40-69
    Moderate,
    /// 0-39
    Low,
}

/// Presentation for a pool level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStatus {
    pub band: PoolBand,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub color_token: &'static str,
}

impl PoolBand {
    pub fn from_level(level: f64) -> Self {
        Self::with_thresholds(level, 70.0, 40.0)
    }

    pub fn with_thresholds(level: f64, high: f64, low: f64) -> Self {
        if level >= high {
            PoolBand::High
        } else if level >= low {
            PoolBand::Moderate
        } else {
            PoolBand::Low
        }
    }

    pub fn status(self) -> PoolStatus {
        match self {
            PoolBand::High => PoolStatus {
                band: self,
                message: "Your tank is full. Great day to tackle the hard habit.",
                suggestion: "Start with the habit you usually put off.",
                color_token: "emerald",
            },
            PoolBand::Moderate => PoolStatus {
                band: self,
                message: "Steady reserves. Protect them.",
                suggestion: "Stack a small habit onto something you already do.",
                color_token: "amber",
            },
            PoolBand::Low => PoolStatus {
                band: self,
                message: "Running low. Go easy on yourself today.",
                suggestion: "Pick one tiny win, then recharge with a walk or rest.",
                color_token: "rose",
            },
        }
    }
}

/// Pure lookup from a pool level to its presentation.
pub fn status_message(level: f64) -> PoolStatus {
    PoolBand::from_level(level).status()
}
