use clap::Subcommand;
use habitpool_core::{CoachContext, PatternAnalyzer, PoolEngine};

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Print the snapshot a coach would receive
    Context {
        /// Print the plain-text prompt block instead of JSON
        #[arg(long)]
        prompt: bool,
    },
}

pub fn run(action: CoachAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        CoachAction::Context { prompt } => {
            if session.ensure_pool_current(None) {
                session.save()?;
            }
            let streak = session.aggregate_streak();
            let report = PatternAnalyzer::with_config(session.config.analytics.clone()).analyze(
                &session.data.completions,
                &session.data.habits,
                &session.data.pool_history,
                session.today(),
            );
            let level = session.data.pool.current_level;
            let status = PoolEngine::with_config(session.config.pool.clone()).status(level);
            let context = CoachContext::new(level, &status, &streak, &report);

            if prompt {
                println!("{}", context.to_prompt_block());
            } else {
                print_json(&context)?;
            }
        }
    }
    Ok(())
}
