//! Game state, win/draw detection and placement rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Mark, Player, BOARD_CELLS, WIN_LINES};
use crate::session::Phase;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors reported by the game core
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell {0} is occupied")]
    CellOccupied(Cell),

    #[error("cell index {0} is outside 0-8")]
    InvalidIndex(i64),

    #[error("game is over ({0:?})")]
    GameOver(Phase),

    #[error("it is {0}'s turn")]
    NotYourTurn(Player),

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Terminal classification of a position, always derived from the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Open,
    WinFor(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Open
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::WinFor(player) => Some(player),
            Outcome::Open | Outcome::Draw => None,
        }
    }
}

/// A placement made in a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub cell: Cell,
}

impl Move {
    pub fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// The 3x3 board
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    board: [Mark; BOARD_CELLS],
}

impl GameState {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_marks(board: [Mark; BOARD_CELLS]) -> Self {
        Self { board }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn get(&self, cell: Cell) -> Mark {
        self.board[cell.index()]
    }

    /// Board contents in cell order
    pub fn marks(&self) -> &[Mark; BOARD_CELLS] {
        &self.board
    }

    pub fn occupied_count(&self) -> usize {
        self.board.iter().filter(|m| !m.is_empty()).count()
    }

    /// Cells still open for play, ascending
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .into_iter()
            .filter(|&cell| self.get(cell).is_empty())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().all(|m| !m.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|m| m.is_empty())
    }

    // ========================================================================
    // RULES
    // ========================================================================

    /// True if `player` holds every cell of at least one win line
    pub fn has_won(&self, player: Player) -> bool {
        let mark = Mark::from(player);
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&cell| self.get(cell) == mark))
    }

    /// Only one side can hold a line in legal play; O is checked first.
    pub fn outcome(&self) -> Outcome {
        if self.has_won(Player::O) {
            Outcome::WinFor(Player::O)
        } else if self.has_won(Player::X) {
            Outcome::WinFor(Player::X)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Open
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Put `player`'s mark on an empty cell
    pub fn place(&mut self, cell: Cell, player: Player) -> Result<(), GameError> {
        if !self.get(cell).is_empty() {
            return Err(GameError::CellOccupied(cell));
        }
        self.board[cell.index()] = Mark::from(player);
        Ok(())
    }

    /// Hypothetical placement during search; the caller knows the cell is empty
    pub(crate) fn apply(&mut self, cell: Cell, player: Player) {
        debug_assert!(self.get(cell).is_empty());
        self.board[cell.index()] = Mark::from(player);
    }

    /// Retract a hypothetical placement during search
    pub(crate) fn undo(&mut self, cell: Cell) {
        self.board[cell.index()] = Mark::Empty;
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.board = [Mark::Empty; BOARD_CELLS];
    }

    /// Pack the board into a base-3 key (transposition table)
    pub(crate) fn key(&self) -> u32 {
        self.board.iter().rev().fold(0u32, |acc, mark| {
            acc * 3
                + match mark {
                    Mark::Empty => 0,
                    Mark::X => 1,
                    Mark::O => 2,
                }
        })
    }
}

impl FromStr for GameState {
    type Err = GameError;

    /// Parse 9 cell characters in row-major order. `X`/`O` are marks and
    /// space, `.`, `-` or `_` are empty. `|` and `/` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = [Mark::Empty; BOARD_CELLS];
        let mut count = 0;

        for c in s.chars().filter(|c| !matches!(c, '|' | '/' | '\n')) {
            let mark = Mark::from_symbol(c)
                .ok_or_else(|| GameError::InvalidBoard(format!("unexpected character {c:?}")))?;
            if count == BOARD_CELLS {
                return Err(GameError::InvalidBoard(format!(
                    "more than {BOARD_CELLS} cells"
                )));
            }
            board[count] = mark;
            count += 1;
        }

        if count != BOARD_CELLS {
            return Err(GameError::InvalidBoard(format!(
                "expected {BOARD_CELLS} cells, found {count}"
            )));
        }

        Ok(Self { board })
    }
}

impl fmt::Display for GameState {
    /// Board with the index legend alongside
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "   --+---+--    --+---+--")?;
            }
            let base = row * 3;
            write!(
                f,
                "   {} | {} | {}    {} | {} | {}",
                self.board[base].symbol(),
                self.board[base + 1].symbol(),
                self.board[base + 2].symbol(),
                base,
                base + 1,
                base + 2,
            )?;
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
