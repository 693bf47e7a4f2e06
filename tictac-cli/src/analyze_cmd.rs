//! Analyze command - score every move on a given board

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use tictac_core::{describe_score, score_moves, GameState, Outcome, Player, SearchResult, Solver};

/// Side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct AnalyzeArgs {
    /// Board as 9 cells in row-major order, e.g. "XX.OO...." ('.', '-', '_' or
    /// space for empty; '|' and '/' separators allowed)
    pub board: String,

    /// Side to move (inferred from mark counts when omitted)
    #[arg(long, value_enum)]
    pub side: Option<Side>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub board: GameState,
    pub side: Player,
    pub outcome: Outcome,
    /// Scores from O's point of view, ascending cell order
    pub moves: Vec<SearchResult>,
    pub best: Option<SearchResult>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let analysis = analyze(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text(&analysis);
    }
    Ok(())
}

pub fn analyze(args: &AnalyzeArgs) -> Result<Analysis> {
    let board: GameState = args
        .board
        .parse()
        .with_context(|| format!("parsing board {:?}", args.board))?;
    let side = match args.side {
        Some(side) => side.into(),
        None => infer_side(&board)?,
    };

    let moves = score_moves(&board, side);
    let best = Solver::new().best_move(&board, side);
    tracing::debug!(side = %side, moves = moves.len(), ?best, "analysis");

    Ok(Analysis {
        outcome: board.outcome(),
        board,
        side,
        moves,
        best,
    })
}

/// Side with fewer marks moves; X on a tie
fn infer_side(board: &GameState) -> Result<Player> {
    let count = |mark| board.marks().iter().filter(|&&m| m == mark).count();
    let xs = count(tictac_core::Mark::X);
    let os = count(tictac_core::Mark::O);
    match xs.abs_diff(os) {
        0 => Ok(Player::X),
        1 if xs > os => Ok(Player::O),
        1 => Ok(Player::X),
        _ => bail!("{xs} X marks and {os} O marks cannot occur in a game; pass --side"),
    }
}

fn print_text(analysis: &Analysis) {
    println!("{}\n", analysis.board);
    println!("To move: {}", analysis.side);

    if analysis.outcome.is_terminal() {
        println!("Game over: {:?}", analysis.outcome);
        return;
    }

    println!("\nCell  Score  Verdict");
    for result in &analysis.moves {
        println!(
            "{:>4}  {:>5}  {}",
            result.cell,
            result.score,
            describe_score(result.score, analysis.side)
        );
    }

    if let Some(best) = analysis.best {
        println!("\nBest move: {} ({})", best.cell, describe_score(best.score, analysis.side));
    }
}
