use clap::{CommandFactory, Parser, Subcommand};
use momentum_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "momentum-cli", version, about = "Momentum recognition engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize dates in text
    Dates(commands::dates::DatesArgs),
    /// Recognize times in text
    Times(commands::times::TimesArgs),
    /// Recognize dates and times against one reference moment
    Scan(commands::scan::ScanArgs),
    /// Classify an ink gesture
    Gesture(commands::gesture::GestureArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions(commands::completions::CompletionsArgs),
}

fn init_tracing(config: &Config) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&config.logging.level).map_err(|e| e.to_string())?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();

    if let Err(e) = init_tracing(&config) {
        eprintln!("warning: invalid log filter '{}': {e}", config.logging.level);
    }

    let result = match cli.command {
        Commands::Dates(args) => commands::dates::run(args, &config),
        Commands::Times(args) => commands::times::run(args, &config),
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Gesture(args) => commands::gesture::run(args, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args, Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
