//! Completion logging commands for CLI.

use chrono::Timelike;
use clap::Subcommand;
use habitpool_core::analytics::DayPart;
use habitpool_core::{
    check_milestone, PoolEngine, RechargeActivity, RewardContext, RewardGate, RewardSelector,
    StreakEngine, StreakScope,
};
use serde::Serialize;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum LogAction {
    /// Mark a habit done now
    Done {
        /// Habit ID or name
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove today's latest entry for a habit
    Undo {
        /// Habit ID or name
        id: String,
    },
}

#[derive(Serialize)]
struct DoneOutcome {
    habit_id: String,
    completions_today: u32,
    lifetime_completions: u64,
    pool_level: f64,
    reward: Option<habitpool_core::Reward>,
    milestone: Option<habitpool_core::Milestone>,
}

pub fn run(action: LogAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        LogAction::Done { id, json } => {
            let id = session.resolve_habit(&id)?;
            let now = session.now;
            let today = session.today();

            session.ensure_pool_current(None);
            session.data.log_completion(&id, now)?;

            let engine = PoolEngine::with_config(session.config.pool.clone());
            let pool = engine.recharge(&session.data.pool, RechargeActivity::HabitCompleted, now);
            session.data.set_pool(pool, today);

            let streak = session.refresh_streak();
            let habit_streak = StreakEngine::with_config(session.config.streak.clone()).compute(
                &StreakScope::Habit(id.clone()),
                &session.data.completions,
                today,
            );

            let completions_today = session.data.completions_on(today);
            let lifetime = session.data.lifetime_completions;
            let mut rng = rand::thread_rng();

            let gate = RewardGate::with_config(session.config.reward.clone());
            let reward = if gate.should_show(completions_today, lifetime, &mut rng) {
                let habit_name = session
                    .data
                    .habit(&id)
                    .map(|h| h.name.clone())
                    .unwrap_or_default();
                let ctx = RewardContext {
                    streak: habit_streak.current_run,
                    habit_name,
                    time_of_day: Some(DayPart::from_hour(now.hour())),
                };
                let selector = RewardSelector::with_recent_window(session.config.reward.recent_window);
                let reward = selector.select(&ctx, &session.data.recent_rewards, &mut rng);
                session.data.push_recent_reward(reward.category);
                Some(reward)
            } else {
                None
            };

            let milestone = check_milestone(streak.current_run, &session.data.unlocked_milestones);
            if let Some(m) = &milestone {
                session.data.unlock_milestone(m.days);
            }

            session.save()?;

            let outcome = DoneOutcome {
                habit_id: id,
                completions_today,
                lifetime_completions: lifetime,
                pool_level: session.data.pool.current_level,
                reward,
                milestone,
            };
            if json {
                return print_json(&outcome);
            }
            println!(
                "Logged. {} today, pool at {:.0}.",
                outcome.completions_today, outcome.pool_level
            );
            if let Some(reward) = &outcome.reward {
                println!("{}", reward.message);
            }
            if let Some(m) = &outcome.milestone {
                println!("Milestone unlocked: {} ({} days). {}", m.title, m.days, m.message);
            }
        }
        LogAction::Undo { id } => {
            let id = session.resolve_habit(&id)?;
            let today = session.today();
            session.data.undo_completion(&id, today)?;
            session.refresh_streak();
            session.save()?;
            println!("Undone. {} completions left today.", session.data.completions_on(today));
        }
    }
    Ok(())
}
