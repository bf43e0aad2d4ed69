//! arithmo CLI: adaptive arithmetic practice at the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "arithmo", version, about = "Adaptive arithmetic tutor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Play {
        /// Player name, used for saved sessions
        #[arg(long)]
        name: String,

        /// Starting difficulty: easy, medium, or hard
        #[arg(long)]
        tier: Option<String>,

        /// Directory for saved sessions
        #[arg(long)]
        session_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List saved sessions for a player
    History {
        /// Player name
        #[arg(long)]
        name: String,

        /// Directory for saved sessions
        #[arg(long)]
        session_dir: Option<PathBuf>,

        /// Show at most this many sessions
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print one saved session in full
    Show {
        /// Path to a saved session JSON file
        path: PathBuf,
    },

    /// Create a starter arithmo.toml config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arithmo=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            tier,
            session_dir,
            config,
        } => commands::play::execute(name, tier, session_dir, config),
        Commands::History {
            name,
            session_dir,
            limit,
            config,
        } => commands::history::execute(name, session_dir, limit, config),
        Commands::Show { path } => commands::show::execute(path),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
