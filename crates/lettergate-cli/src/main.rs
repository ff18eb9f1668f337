use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lettergate-cli", version, about = "Lettergate CLI")]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gate status of a single unlock date
    Countdown(commands::countdown::CountdownArgs),
    /// Evaluate a letter manifest
    Schedule(commands::schedule::ScheduleArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LETTERGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Countdown(args) => commands::countdown::run(args, config),
        Commands::Schedule(args) => commands::schedule::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
