use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod config;

use app::App;
use commands::{
    ActivityCommand, ConfigCommand, FamilyCommand, MealCommand, PackingCommand, PhotoCommand,
    TimelineCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "dillon")]
#[command(version)]
#[command(about = "Plan the Lake Dillon Thanksgiving trip", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the day-by-day plan
    Timeline(TimelineCommand),

    /// Schedule and edit activities
    Activity(ActivityCommand),

    /// Schedule and edit meals
    Meal(MealCommand),

    /// Upload, browse and export photos
    Photo(PhotoCommand),

    /// List the travelling party
    Family(FamilyCommand),

    /// Manage per-member packing lists
    Packing(PackingCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path),
        Some(Commands::Family(cmd)) => cmd.run(),
        Some(command) => {
            let mut app = App::from_config(&config)?;
            execute_command(command, &mut app)
        }
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

fn execute_command(command: Commands, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Timeline(cmd) => cmd.run(app),
        Commands::Activity(cmd) => cmd.run(app),
        Commands::Meal(cmd) => cmd.run(app),
        Commands::Photo(cmd) => cmd.run(app),
        Commands::Packing(cmd) => cmd.run(app),
        Commands::Family(cmd) => cmd.run(),
        Commands::Config(_) => Ok(()),
    }
}
