use clap::Args;
use habitpool_core::PatternAnalyzer;

use super::{print_json, CliResult, Session};

#[derive(Args)]
pub struct TrendsArgs {
    /// Output the full report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TrendsArgs) -> CliResult {
    let session = Session::open()?;
    let report = PatternAnalyzer::with_config(session.config.analytics.clone()).analyze(
        &session.data.completions,
        &session.data.habits,
        &session.data.pool_history,
        session.today(),
    );

    if args.json {
        return print_json(&report);
    }

    let summary = &report.summary;
    println!(
        "{} completions over {} active days across {} habits",
        summary.total_completions, summary.active_days, summary.active_habits
    );
    if summary.skipped_entries > 0 {
        println!("({} malformed entries skipped)", summary.skipped_entries);
    }
    for habit in &report.habits {
        let data = if habit.has_enough_data { "" } else { " (early data)" };
        println!(
            "  {}: week {:.0}%, month {:.0}%, trend {:+.0} ({:?}){data}",
            habit.habit_name, habit.week_rate, habit.month_rate, habit.trend, habit.trend_direction
        );
    }
    if report.insights.is_empty() {
        println!("No insights yet. Keep logging for a couple of weeks.");
    }
    for insight in &report.insights {
        println!("* {}: {}", insight.title, insight.message);
    }
    Ok(())
}
