//! Memoized full-tree solver
//!
//! Same minimax as [`crate::ai`], with every solved position kept in a
//! transposition table. A position's value and best cell depend only on the
//! board and the side to move, so cached answers are identical to a fresh
//! search, tie-break included.

use rustc_hash::FxHashMap;

use crate::ai::{improves, SearchResult};
use crate::board::{Cell, Player};
use crate::eval::terminal_score;
use crate::game::GameState;

/// Cached answer for one (board, side to move) pair
#[derive(Clone, Copy, Debug)]
struct Entry {
    score: i32,
    cell: Option<Cell>,
}

/// Transposition-table solver
#[derive(Clone, Debug, Default)]
pub struct Solver {
    table: FxHashMap<u32, Entry>,
    hits: u64,
    misses: u64,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions solved so far
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Best move for `side`, or None if the game is over
    pub fn best_move(&mut self, state: &GameState, side: Player) -> Option<SearchResult> {
        if state.is_terminal() {
            return None;
        }

        let mut scratch = state.clone();
        let entry = self.solve(&mut scratch, side);
        tracing::debug!(
            side = %side,
            positions = self.table.len(),
            hits = self.hits,
            misses = self.misses,
            "solver lookup"
        );
        entry.cell.map(|cell| SearchResult {
            cell,
            score: entry.score,
        })
    }

    /// Minimax value of the position with `side` to move (terminal
    /// positions included)
    pub fn value(&mut self, state: &GameState, side: Player) -> i32 {
        let mut scratch = state.clone();
        self.solve(&mut scratch, side).score
    }

    fn solve(&mut self, state: &mut GameState, side: Player) -> Entry {
        let key = state.key() << 1 | side as u32;
        if let Some(&entry) = self.table.get(&key) {
            self.hits += 1;
            return entry;
        }
        self.misses += 1;

        let entry = match terminal_score(state) {
            Some(score) => Entry { score, cell: None },
            None => {
                let mut best: Option<Entry> = None;
                for cell in state.empty_cells() {
                    state.apply(cell, side);
                    let score = self.solve(state, side.opponent()).score;
                    state.undo(cell);

                    if best.map_or(true, |b| improves(side, score, b.score)) {
                        best = Some(Entry {
                            score,
                            cell: Some(cell),
                        });
                    }
                }
                best.unwrap_or(Entry {
                    score: 0,
                    cell: None,
                })
            }
        };

        self.table.insert(key, entry);
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{best_move, score_moves};

    #[test]
    fn test_matches_plain_search() {
        let mut solver = Solver::new();
        for s in ["XX OO    ", "XX OO  X ", "O...X....", "XOXXOO.X.", "X...O...."] {
            let game: GameState = s.parse().unwrap();
            for side in [Player::X, Player::O] {
                assert_eq!(solver.best_move(&game, side), best_move(&game, side), "{s} {side}");
            }
        }
    }

    #[test]
    fn test_every_reply_matches_score_moves() {
        let mut solver = Solver::new();
        let game: GameState = "X...O....".parse().unwrap();
        for result in score_moves(&game, Player::X) {
            let mut child = game.clone();
            child.place(result.cell, Player::X).unwrap();
            assert_eq!(solver.value(&child, Player::O), result.score);
        }
    }

    #[test]
    fn test_cache_reuse() {
        let mut solver = Solver::new();
        let empty = GameState::new();
        let first = solver.best_move(&empty, Player::O);
        let size = solver.len();
        let second = solver.best_move(&empty, Player::O);
        assert_eq!(first, second);
        assert_eq!(solver.len(), size);
        assert!(solver.stats().0 > 0);
        // Fewer distinct positions than the full game tree
        assert!(size < 20_000);
    }

    #[test]
    fn test_terminal() {
        let mut solver = Solver::new();
        let game: GameState = "XXXOO....".parse().unwrap();
        assert!(solver.best_move(&game, Player::O).is_none());
        assert_eq!(solver.value(&game, Player::O), -5);
    }
}
