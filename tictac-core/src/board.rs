//! Board geometry: cells, sides, marks and the fixed win lines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::GameError;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// Side length of the square grid
pub const BOARD_SIDE: u8 = 3;

/// A cell index in row-major order:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// Only indices in `0..=8` can be constructed, so anything holding a `Cell`
/// is already range-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    /// All cells in ascending index order
    pub const ALL: [Cell; BOARD_CELLS] = [
        Cell(0), Cell(1), Cell(2),
        Cell(3), Cell(4), Cell(5),
        Cell(6), Cell(7), Cell(8),
    ];

    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < BOARD_CELLS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Row-major index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIDE
    }

    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIDE
    }

    /// Check if this is one of the four corners
    pub fn is_corner(self) -> bool {
        CORNERS.contains(&self)
    }
}

impl TryFrom<i64> for Cell {
    type Error = GameError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Cell::new)
            .ok_or(GameError::InvalidIndex(value))
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Cell::new(value).ok_or(GameError::InvalidIndex(value as i64))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X = 0,
    O = 1,
}

impl Player {
    /// The human always plays X
    pub const HUMAN: Player = Player::X;

    /// The automated opponent always plays O
    pub const COMPUTER: Player = Player::O;

    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        Mark::from(self).symbol()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }

    /// Side owning this mark (None for an empty cell)
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parse a board-string character
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            ' ' | '.' | '-' | '_' => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

/// The 8 lines that win the game when one side holds all three cells.
/// Rows, then columns, then diagonals.
pub const WIN_LINES: [[Cell; 3]; 8] = [
    [Cell(0), Cell(1), Cell(2)],
    [Cell(3), Cell(4), Cell(5)],
    [Cell(6), Cell(7), Cell(8)],
    [Cell(0), Cell(3), Cell(6)],
    [Cell(1), Cell(4), Cell(7)],
    [Cell(2), Cell(5), Cell(8)],
    [Cell(0), Cell(4), Cell(8)],
    [Cell(2), Cell(4), Cell(6)],
];

/// Corner cells, candidates for the opening move
pub const CORNERS: [Cell; 4] = [Cell(0), Cell(2), Cell(6), Cell(8)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_range() {
        assert!(Cell::new(0).is_some());
        assert!(Cell::new(8).is_some());
        assert!(Cell::new(9).is_none());
        assert_eq!(Cell::try_from(-1i64), Err(GameError::InvalidIndex(-1)));
        assert_eq!(Cell::try_from(9i64), Err(GameError::InvalidIndex(9)));
        assert_eq!(Cell::try_from(4i64).map(Cell::index), Ok(4));
    }

    #[test]
    fn test_row_col() {
        let cell = Cell::new(5).unwrap();
        assert_eq!(cell.row(), 1);
        assert_eq!(cell.col(), 2);
        assert!(Cell::new(6).unwrap().is_corner());
        assert!(!Cell::new(4).unwrap().is_corner());
    }

    #[test]
    fn test_win_lines_cover_board() {
        // Centre sits on 4 lines, corners on 3, edges on 2
        let count = |i: u8| {
            let cell = Cell::new(i).unwrap();
            WIN_LINES.iter().filter(|line| line.contains(&cell)).count()
        };
        assert_eq!(count(4), 4);
        for corner in CORNERS {
            assert_eq!(count(corner.0), 3);
        }
        for edge in [1, 3, 5, 7] {
            assert_eq!(count(edge), 2);
        }
    }

    #[test]
    fn test_player_mark() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Mark::from(Player::O), Mark::O);
        assert_eq!(Mark::O.player(), Some(Player::O));
        assert_eq!(Mark::Empty.player(), None);
        assert_eq!(Mark::from_symbol('.'), Some(Mark::Empty));
        assert_eq!(Mark::from_symbol('?'), None);
    }

    #[test]
    fn test_cell_serde() {
        let json = serde_json::to_string(&Cell::new(7).unwrap()).unwrap();
        assert_eq!(json, "7");
        assert!(serde_json::from_str::<Cell>("9").is_err());
    }
}
