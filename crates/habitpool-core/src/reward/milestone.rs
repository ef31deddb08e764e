//! Streak milestones.

use serde::Serialize;

/// Day thresholds that unlock a milestone.
pub const MILESTONE_LADDER: [u32; 8] = [3, 7, 14, 21, 30, 45, 60, 90];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub days: u32,
    pub title: &'static str,
    pub message: &'static str,
}

fn describe(days: u32) -> (&'static str, &'static str) {
    match days {
        3 => ("Spark", "Three days in. The hardest part is behind you."),
        7 => ("One Week", "A full week. Your brain is starting to expect this."),
        14 => ("Fortnight", "Two weeks of showing up. This is becoming routine."),
        21 => ("Three Weeks", "21 days. The groove is forming."),
        30 => ("One Month", "A month strong. This is who you are now."),
        45 => ("Six Weeks", "45 days. Momentum is on your side."),
        60 => ("Two Months", "60 days. Most people never get here."),
        90 => ("Quarter", "90 days. This habit is part of your life."),
        _ => ("Milestone", "Another milestone reached."),
    }
}

/// Lowest ladder threshold reached by `current_streak` that is not unlocked.
pub fn check_milestone(current_streak: u32, unlocked: &[u32]) -> Option<Milestone> {
    MILESTONE_LADDER
        .iter()
        .copied()
        .take_while(|days| *days <= current_streak)
        .find(|days| !unlocked.contains(days))
        .map(|days| {
            let (title, message) = describe(days);
            Milestone {
                days,
                title,
                message,
            }
        })
}
