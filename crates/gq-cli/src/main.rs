//! CLI frontend for GitQuest, the gamified Git-learning terminal.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gq",
    about = "GitQuest: learn Git by playing through missions in a simulated terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory progress is saved in
    #[arg(long, global = true, env = "GQ_STATE_DIR", default_value = ".gitquest")]
    state_dir: PathBuf,

    /// Session key; each key keeps its own progress
    #[arg(long, global = true, default_value = "gitquest-progress")]
    session: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive Git terminal
    Play {
        /// Start this mission before the first prompt
        #[arg(short, long)]
        mission: Option<u32>,
    },

    /// Show level, XP, accuracy, and streak
    Status,

    /// List chapters and missions with their lock state
    Missions,

    /// List badges and which ones are unlocked
    Badges,

    /// List every command the terminal understands
    Commands,

    /// Check that a mission can be started
    Start {
        /// Mission id
        id: u32,
    },

    /// Mark a mission completed and collect its XP
    Complete {
        /// Mission id
        id: u32,
    },

    /// Erase all saved progress for the session
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let state = &cli.state_dir;
    let key = cli.session.as_str();

    let result = match cli.command {
        Commands::Play { mission } => commands::play::run(state, key, mission),
        Commands::Status => commands::status::run(state, key),
        Commands::Missions => commands::missions::run(state, key),
        Commands::Badges => commands::badges::run(state, key),
        Commands::Commands => commands::cheatsheet::run(),
        Commands::Start { id } => commands::mission::start(state, key, id),
        Commands::Complete { id } => commands::mission::complete(state, key, id),
        Commands::Reset { yes } => commands::reset::run(state, key, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
