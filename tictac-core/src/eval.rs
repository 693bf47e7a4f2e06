//! Terminal position scoring
//!
//! Scores are from O's point of view. A win is worth one more than the
//! number of empty cells left, so quicker wins score higher and quicker
//! losses score lower. A drawn board scores zero.

use crate::board::{Player, BOARD_CELLS};
use crate::game::{GameState, Outcome};

/// Upper bound on any score
pub const MAX_SCORE: i32 = BOARD_CELLS as i32;

/// Lower bound on any score
pub const MIN_SCORE: i32 = -MAX_SCORE;

/// Score a terminal position, or None if the game is still open
pub fn terminal_score(state: &GameState) -> Option<i32> {
    let remaining = state.empty_cells().len() as i32;
    match state.outcome() {
        Outcome::WinFor(Player::O) => Some(remaining + 1),
        Outcome::WinFor(Player::X) => Some(-(remaining + 1)),
        Outcome::Draw => Some(0),
        Outcome::Open => None,
    }
}

/// Plain-language verdict for a score under optimal play, told from the
/// perspective of `side`
pub fn describe_score(score: i32, side: Player) -> String {
    if score == 0 {
        return "draw".to_string();
    }

    let winner = if score > 0 { Player::O } else { Player::X };
    let left = score.abs() - 1;
    let verdict = if winner == side { "win" } else { "loss" };
    format!("{verdict} for {side} ({winner} wins with {left} cells left)")
}
