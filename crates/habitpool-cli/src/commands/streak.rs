use clap::Args;
use habitpool_core::{StreakEngine, StreakScope};

use super::{print_json, CliResult, Session};

#[derive(Args)]
pub struct StreakArgs {
    /// Habit ID or name (default: all habits)
    #[arg(long)]
    habit: Option<String>,
    /// Window length in days (default: from config)
    #[arg(long)]
    window: Option<u32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StreakArgs) -> CliResult {
    let mut session = Session::open()?;

    let mut config = session.config.streak.clone();
    if let Some(window) = args.window {
        config.window_days = window;
    }
    let scope = match &args.habit {
        Some(key) => StreakScope::Habit(session.resolve_habit(key)?),
        None => StreakScope::All {
            habit_count: session.data.habits.len(),
        },
    };
    let result = StreakEngine::with_config(config).compute(
        &scope,
        &session.data.completions,
        session.today(),
    );

    // Only the default aggregate view feeds the cached counters
    if args.habit.is_none() && args.window.is_none() {
        session.data.refresh_streak_counters(&result);
        session.save()?;
    }

    if args.json {
        return print_json(&result);
    }
    println!(
        "Consistency: {}% ({} of {} days) [{}]",
        result.consistency_score, result.hits, result.window_days, result.color_token
    );
    println!("Current run: {} days, best: {} days", result.current_run, result.best_run);
    println!("{}", result.message);
    if !result.has_enough_data {
        println!("(Not enough history yet; keep logging for a week.)");
    }
    Ok(())
}
