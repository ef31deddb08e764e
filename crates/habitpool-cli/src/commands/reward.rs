use clap::Subcommand;
use habitpool_core::reward::MILESTONE_LADDER;
use habitpool_core::check_milestone;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum RewardAction {
    /// Show unlocked milestones and the next one
    Milestones {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: RewardAction) -> CliResult {
    let session = Session::open()?;

    match action {
        RewardAction::Milestones { json } => {
            let data = &session.data;
            let next = MILESTONE_LADDER
                .iter()
                .copied()
                .find(|days| !data.unlocked_milestones.contains(days));
            if json {
                return print_json(&serde_json::json!({
                    "current_streak": data.current_streak,
                    "best_streak": data.best_streak,
                    "unlocked": data.unlocked_milestones,
                    "next": next,
                    "pending": check_milestone(data.current_streak, &data.unlocked_milestones),
                }));
            }
            println!(
                "Streak: {} days (best {})",
                data.current_streak, data.best_streak
            );
            if data.unlocked_milestones.is_empty() {
                println!("No milestones unlocked yet.");
            } else {
                let list: Vec<String> = data
                    .unlocked_milestones
                    .iter()
                    .map(|d| d.to_string())
                    .collect();
                println!("Unlocked: {} days", list.join(", "));
            }
            match next {
                Some(days) => println!("Next milestone: {days} days"),
                None => println!("Every milestone unlocked."),
            }
        }
    }
    Ok(())
}
