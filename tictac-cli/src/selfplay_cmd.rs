//! Selfplay command - let the computer play whole games
//!
//! O always plays the perfect-play search. X is either the same search or a
//! uniformly random mover, which shows the search never loses.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: rng and formatting utilities

use anyhow::Result;
use clap::{Args, ValueEnum};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use tictac_core::{GameState, MinimaxAI, Move, Outcome, Player, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Who plays X
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Perfect play
    #[default]
    Optimal,
    /// Uniformly random legal moves
    Random,
}

#[derive(Args, Clone, Debug)]
pub struct SelfplayArgs {
    /// Number of games to play (first move alternates)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// X player
    #[arg(long, value_enum, default_value = "optimal")]
    pub opponent: Opponent,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search the empty board instead of opening in a random corner
    #[arg(long)]
    pub exhaustive: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for SelfplayArgs {
    fn default() -> Self {
        Self {
            games: 10,
            opponent: Opponent::Optimal,
            seed: None,
            exhaustive: false,
            json: false,
        }
    }
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub first: Player,
    pub outcome: Outcome,
    pub moves: Vec<Move>,
}

/// Aggregated results
#[derive(Clone, Debug, Default, Serialize)]
pub struct SelfplayResults {
    pub games: Vec<GameRecord>,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
pub fn run(args: SelfplayArgs) -> Result<()> {
    tracing::info!(
        "Starting selfplay: {} games, X = {:?}",
        args.games,
        args.opponent
    );

    let results = play_games(&args);
    report_results(&results, &args)?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games
pub fn play_games(args: &SelfplayArgs) -> SelfplayResults {
    let mut rng = create_rng(args.seed);
    let mut config = SearchConfig::default().cached().with_seed(rng.gen());
    if args.exhaustive {
        config = config.exhaustive();
    }
    let mut ai = MinimaxAI::new(config);

    let games = (0..args.games)
        .map(|game_num| {
            // Alternate who opens
            let first = if game_num % 2 == 0 { Player::X } else { Player::O };
            let record = play_single_game(&mut ai, &mut rng, args.opponent, first, game_num + 1);
            tracing::info!(
                "Game {}: {:?} ({} moves)",
                record.game_number,
                record.outcome,
                record.moves.len()
            );
            record
        })
        .collect();

    compute_statistics(games)
}

/// Report results
fn report_results(results: &SelfplayResults, args: &SelfplayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    ai: &mut MinimaxAI,
    rng: &mut ChaCha8Rng,
    opponent: Opponent,
    first: Player,
    game_number: usize,
) -> GameRecord {
    let (state, moves) = match opponent {
        Opponent::Optimal => ai.play_game(GameState::new(), first),
        Opponent::Random => play_against_random(ai, rng, first),
    };

    GameRecord {
        game_number,
        first,
        outcome: state.outcome(),
        moves,
    }
}

/// O searches, X picks any open cell
fn play_against_random(
    ai: &mut MinimaxAI,
    rng: &mut ChaCha8Rng,
    first: Player,
) -> (GameState, Vec<Move>) {
    let mut state = GameState::new();
    let mut moves = Vec::new();
    let mut side = first;

    while !state.is_terminal() {
        let cell = match side {
            Player::X => state.empty_cells().choose(rng).copied(),
            Player::O => ai.choose_move(&state, side).map(|r| r.cell),
        };
        let Some(cell) = cell else { break };
        if state.place(cell, side).is_err() {
            break;
        }
        moves.push(Move::new(side, cell));
        side = side.opponent();
    }

    (state, moves)
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let x_wins = count(Outcome::WinFor(Player::X));
    let o_wins = count(Outcome::WinFor(Player::O));
    let draws = count(Outcome::Draw);

    SelfplayResults {
        games,
        x_wins,
        o_wins,
        draws,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as text
fn print_text_results(results: &SelfplayResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));

    println!("\nGame details:");
    for game in &results.games {
        let cells: Vec<String> = game.moves.iter().map(|m| m.cell.to_string()).collect();
        println!(
            "  Game {}: {} first, {:?} [{}]",
            game.game_number,
            game.first,
            game.outcome,
            cells.join(" ")
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
