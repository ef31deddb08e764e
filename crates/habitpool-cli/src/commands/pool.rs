//! Drive pool commands for CLI.

use clap::Subcommand;
use habitpool_core::{DrainActivity, PoolEngine, RechargeActivity};
use serde::Serialize;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum PoolAction {
    /// Show the current pool level
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run today's morning reset (no-op if it already ran)
    Reset {
        /// Hours slept last night
        #[arg(long)]
        sleep: Option<f64>,
    },
    /// Record a draining activity (name or amount)
    Drain {
        /// e.g. social, gaming, streaming, junk-food, news, shopping, or a number
        activity: String,
    },
    /// Record a recharging activity (name or amount)
    Recharge {
        /// e.g. exercise, meditation, walk, reading, friends, nap, or a number
        activity: String,
    },
}

#[derive(Serialize)]
struct StatusView<'a> {
    level: f64,
    morning_level: f64,
    #[serde(flatten)]
    status: habitpool_core::PoolStatus,
    drain_events: &'a [habitpool_core::pool::PoolEvent],
    recharge_events: &'a [habitpool_core::pool::PoolEvent],
}

pub fn run(action: PoolAction) -> CliResult {
    let mut session = Session::open()?;
    let engine = PoolEngine::with_config(session.config.pool.clone());
    let now = session.now;
    let today = session.today();

    match action {
        PoolAction::Status { json } => {
            if session.ensure_pool_current(None) {
                session.save()?;
            }
            let pool = &session.data.pool;
            let view = StatusView {
                level: pool.current_level,
                morning_level: pool.morning_level,
                status: engine.status(pool.current_level),
                drain_events: &pool.drain_events,
                recharge_events: &pool.recharge_events,
            };
            if json {
                return print_json(&view);
            }
            println!(
                "Pool: {:.0}/100 (morning {:.0}) [{}]",
                view.level, view.morning_level, view.status.color_token
            );
            println!("{}", view.status.message);
            println!("Try: {}", view.status.suggestion);
        }
        PoolAction::Reset { sleep } => {
            if session.ensure_pool_current(sleep) {
                session.save()?;
                println!("Pool reset to {:.0}.", session.data.pool.current_level);
            } else {
                println!(
                    "Pool already reset today ({:.0}).",
                    session.data.pool.current_level
                );
            }
        }
        PoolAction::Drain { activity } => {
            let activity = DrainActivity::parse(&activity)
                .ok_or_else(|| format!("unknown drain activity: {activity}"))?;
            session.ensure_pool_current(None);
            let next = engine.drain(&session.data.pool, activity, now);
            session.data.set_pool(next, today);
            session.save()?;
            println!(
                "{}: pool now {:.0}.",
                activity.label(),
                session.data.pool.current_level
            );
        }
        PoolAction::Recharge { activity } => {
            let activity = RechargeActivity::parse(&activity)
                .ok_or_else(|| format!("unknown recharge activity: {activity}"))?;
            session.ensure_pool_current(None);
            let next = engine.recharge(&session.data.pool, activity, now);
            session.data.set_pool(next, today);
            session.save()?;
            println!(
                "{}: pool now {:.0}.",
                activity.label(),
                session.data.pool.current_level
            );
        }
    }
    Ok(())
}
