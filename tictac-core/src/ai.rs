//! Exhaustive minimax search and the automated opponent

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, Player, CORNERS};
use crate::config::SearchConfig;
use crate::eval::terminal_score;
use crate::game::{GameState, Move};
use crate::solver::Solver;

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// A move together with its minimax score (from O's point of view)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub cell: Cell,
    pub score: i32,
}

/// Counters collected during a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root included
    pub nodes: u64,
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Best move for `side`, or None if the game is already over.
///
/// O maximizes and X minimizes. Every legal move is searched to the end of
/// the game; among equally scored moves the lowest cell index wins.
pub fn best_move(state: &GameState, side: Player) -> Option<SearchResult> {
    let mut stats = SearchStats::default();
    let result = best_move_with_stats(state, side, &mut stats);
    tracing::debug!(side = %side, nodes = stats.nodes, ?result, "minimax search");
    result
}

/// Same as [`best_move`], accumulating counters into `stats`
pub fn best_move_with_stats(
    state: &GameState,
    side: Player,
    stats: &mut SearchStats,
) -> Option<SearchResult> {
    if state.is_terminal() {
        return None;
    }

    // Search on a private copy so the live board is never touched
    let mut scratch = state.clone();
    let (score, cell) = minimax(&mut scratch, side, stats);
    cell.map(|cell| SearchResult { cell, score })
}

/// Score of every legal move for `side`, in ascending cell order
pub fn score_moves(state: &GameState, side: Player) -> Vec<SearchResult> {
    if state.is_terminal() {
        return Vec::new();
    }

    let mut stats = SearchStats::default();
    let mut scratch = state.clone();
    let results: Vec<SearchResult> = state
        .empty_cells()
        .into_iter()
        .map(|cell| {
            scratch.apply(cell, side);
            let (score, _) = minimax(&mut scratch, side.opponent(), &mut stats);
            scratch.undo(cell);
            SearchResult { cell, score }
        })
        .collect();

    tracing::debug!(side = %side, nodes = stats.nodes, moves = results.len(), "scored moves");
    results
}

/// True if `candidate` is strictly better than `best` for `side`
pub(crate) fn improves(side: Player, candidate: i32, best: i32) -> bool {
    match side {
        Player::O => candidate > best,
        Player::X => candidate < best,
    }
}

fn minimax(state: &mut GameState, side: Player, stats: &mut SearchStats) -> (i32, Option<Cell>) {
    stats.nodes += 1;

    if let Some(score) = terminal_score(state) {
        return (score, None);
    }

    let mut best: Option<(i32, Cell)> = None;

    for cell in state.empty_cells() {
        state.apply(cell, side);
        let (score, _) = minimax(state, side.opponent(), stats);
        state.undo(cell);

        let better = match best {
            None => true,
            Some((best_score, _)) => improves(side, score, best_score),
        };
        if better {
            best = Some((score, cell));
        }
    }

    match best {
        Some((score, cell)) => (score, Some(cell)),
        // Unreachable: an open position always has an empty cell
        None => (0, None),
    }
}

// ============================================================================
// AUTOMATED OPPONENT
// ============================================================================

/// Perfect-play opponent
pub struct MinimaxAI {
    config: SearchConfig,
    rng: ChaCha8Rng,
    solver: Option<Solver>,
}

impl MinimaxAI {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let solver = config.use_cache.then(Solver::new);
        Self { config, rng, solver }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SearchConfig::default().with_seed(seed))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick the move for `side`, or None if the game is over.
    ///
    /// On an empty board with the opening shortcut enabled a random corner
    /// is returned without searching; a corner opening is worth a draw.
    pub fn choose_move(&mut self, state: &GameState, side: Player) -> Option<SearchResult> {
        if state.is_terminal() {
            return None;
        }

        if self.config.opening_shortcut && state.is_empty() {
            let cell = *CORNERS.choose(&mut self.rng)?;
            tracing::debug!(%cell, "opening corner");
            return Some(SearchResult { cell, score: 0 });
        }

        match self.solver.as_mut() {
            Some(solver) => solver.best_move(state, side),
            None => best_move(state, side),
        }
    }

    /// Play both sides optimally until the game ends
    pub fn play_game(&mut self, initial: GameState, first: Player) -> (GameState, Vec<Move>) {
        let mut state = initial;
        let mut history = Vec::new();
        let mut side = first;

        while let Some(result) = self.choose_move(&state, side) {
            state.apply(result.cell, side);
            history.push(Move::new(side, result.cell));
            side = side.opponent();
        }

        (state, history)
    }
}

// ============================================================================
// TESTS
// ============================================================================
