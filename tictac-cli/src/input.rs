//! Validation of the human's typed moves

use tictac_core::{Cell, GameState};

/// Why a typed move was rejected
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not an Integer! Please try again...")]
    NotAnInteger(String),

    #[error("'{0}' is not in range 0-8! Please try again...")]
    OutOfRange(i64),

    #[error("'{0}' is occupied! Try another valid cell number")]
    Occupied(Cell),
}

/// Turn a raw line into a cell that is free on `board`.
///
/// Checks run in order: integer, range, occupancy.
pub fn parse_cell(raw: &str, board: &GameState) -> Result<Cell, InputError> {
    let trimmed = raw.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))?;
    let cell = Cell::try_from(number).map_err(|_| InputError::OutOfRange(number))?;
    if !board.get(cell).is_empty() {
        return Err(InputError::Occupied(cell));
    }
    Ok(cell)
}
