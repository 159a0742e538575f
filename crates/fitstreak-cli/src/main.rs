use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitstreak", version, about = "Fitstreak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workout session control
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Sign-in identity management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Completed-session history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
