//! Driver's Friend CLI: the main entry point.
//!
//! Commands:
//! - `init`: Write a default config
//! - `ask`: Ask one question or chat interactively
//! - `serve`: Start the HTTP gateway
//! - `seed`: Load regulations from a JSON file into the store
//! - `categories`: List the store's categories for a language

use clap::{Parser, Subcommand};
use driversfriend_config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "driversfriend",
    about = "Driver's Friend: answers to driving-regulation questions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,

    /// Ask a question; without --message, start an interactive session
    Ask {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Language tag (en-US, de, ...)
        #[arg(short, long, default_value = "en-US")]
        language: String,

        /// User identifier for conversation memory
        #[arg(short, long, default_value = "cli")]
        user: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Insert regulations from a JSON array file
    Seed {
        /// Path to the seed file
        file: std::path::PathBuf,
    },

    /// List categories in the knowledge store
    Categories {
        #[arg(short, long, default_value = "en-US")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // `init` must work before any config file exists
    let config = match cli.command {
        Commands::Init => AppConfig::default(),
        _ => AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?,
    };
    init_tracing(cli.verbose, &config);

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Ask {
            message,
            language,
            user,
            json,
        } => commands::ask::run(config, message, language, user, json).await?,
        Commands::Serve { port } => commands::serve::run(config, port).await?,
        Commands::Seed { file } => commands::seed::run(config, &file).await?,
        Commands::Categories { language } => commands::categories::run(config, &language).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool, config: &AppConfig) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
