use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "prajnayana-cli", version, about = "Prajnayana CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Vision board notes
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Profile view and edit
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Self-discovery questionnaire
    Discovery {
        #[command(subcommand)]
        action: commands::discovery::DiscoveryAction,
    },
    /// API token and account registration
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action).await,
        Commands::Board { action } => commands::board::run(action).await,
        Commands::Profile { action } => commands::profile::run(action).await,
        Commands::Discovery { action } => commands::discovery::run(action).await,
        Commands::Auth { action } => commands::auth::run(action).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
