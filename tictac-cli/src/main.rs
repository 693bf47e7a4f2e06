//! TICTAC CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer (default)
//! - selfplay: Let the search play whole games
//! - analyze: Score every move on a board

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictac_cli::{analyze_cmd, play_cmd, selfplay_cmd};

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a perfect-play minimax opponent")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace); RUST_LOG wins if set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play(play_cmd::PlayArgs),
    /// Let the computer play whole games
    Selfplay(selfplay_cmd::SelfplayArgs),
    /// Score every move on a board
    Analyze(analyze_cmd::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Play(Default::default())) {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Selfplay(args) => selfplay_cmd::run(args),
        Commands::Analyze(args) => analyze_cmd::run(args),
    }
}

/// Log to stderr so the board on stdout stays clean
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
