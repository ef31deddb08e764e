//! Habit management commands for CLI.

use clap::Subcommand;
use habitpool_core::Habit;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// Daily target amount (default: 1)
        #[arg(long, default_value = "1")]
        target: u32,
        /// Unit for the target (e.g. "glasses")
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// List habits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a habit and its completion history
    Delete {
        /// Habit ID or name
        id: String,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        HabitAction::Add { name, target, unit } => {
            let habit = session
                .data
                .add_habit(Habit::new(name).with_target(target, unit))?
                .clone();
            session.save()?;
            println!("Habit created: {}", habit.id);
            print_json(&habit)?;
        }
        HabitAction::List { json } => {
            if json {
                return print_json(&session.data.habits);
            }
            if session.data.habits.is_empty() {
                println!("No habits yet. Add one with `habitpool habit add <name>`.");
            }
            let today = session.today();
            for habit in &session.data.habits {
                let done_today = session
                    .data
                    .completions
                    .iter()
                    .any(|e| e.habit_id == habit.id && e.completed && e.local_date() == Some(today));
                let mark = if done_today { "x" } else { " " };
                let target = if habit.unit.is_empty() {
                    habit.target_amount.to_string()
                } else {
                    format!("{} {}", habit.target_amount, habit.unit)
                };
                println!("[{mark}] {}  {} ({target})", habit.id, habit.name);
            }
        }
        HabitAction::Delete { id } => {
            let id = session.resolve_habit(&id)?;
            let (habit, removed) = session.data.delete_habit(&id)?;
            session.save()?;
            println!("Habit deleted: {} ({removed} completions removed)", habit.name);
        }
    }
    Ok(())
}
