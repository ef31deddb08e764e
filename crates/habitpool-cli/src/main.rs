use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitpool", version, about = "Habitpool habit coach CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Log or undo completions
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Streak and consistency
    Streak(commands::streak::StreakArgs),
    /// Drive pool
    Pool {
        #[command(subcommand)]
        action: commands::pool::PoolAction,
    },
    /// Pattern analytics report
    Trends(commands::trends::TrendsArgs),
    /// Rewards and milestones
    Reward {
        #[command(subcommand)]
        action: commands::reward::RewardAction,
    },
    /// Coach context
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("HABITPOOL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Pool { action } => commands::pool::run(action),
        Commands::Trends(args) => commands::trends::run(args),
        Commands::Reward { action } => commands::reward::run(action),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitpool", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
