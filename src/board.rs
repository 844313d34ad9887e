//! The 9-cell grid and per-cell occupant.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Occupant of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// Nobody has played here.
    Empty,
    /// The player holding the device.
    Human,
    /// The built-in opponent.
    Opponent,
}

/// Errors that can occur when placing a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// The target cell already holds a piece.
    #[display("cell {_0} is already occupied")]
    OccupiedCell(#[error(not(source))] usize),
}

/// 3x3 board, cells indexed 0-8 in row-major order (`index = row * 3 + col`).
///
/// For the lifetime of one game a cell is written at most once: the board
/// only ever moves from more-empty to less-empty. `place` enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Occupant; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Occupant::Empty; 9],
        }
    }

    /// Gets the occupant at the given position.
    pub fn get(&self, pos: usize) -> Option<Occupant> {
        self.cells.get(pos).copied()
    }

    /// Returns true iff `pos` is on the board and the cell is empty.
    pub fn is_occupiable(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Occupant::Empty))
    }

    /// Places `occupant` at `pos`.
    ///
    /// Mutates only the addressed cell.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::OccupiedCell`] if the cell is out of range or
    /// already holds a piece. The board is unchanged on error.
    pub fn place(&mut self, occupant: Occupant, pos: usize) -> Result<(), PlaceError> {
        if !self.is_occupiable(pos) {
            return Err(PlaceError::OccupiedCell(pos));
        }
        trace!(?occupant, pos, "placing piece");
        self.cells[pos] = occupant;
        Ok(())
    }

    /// Returns the lowest-index empty cell, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.cells.iter().position(|c| *c == Occupant::Empty)
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Occupant::Empty)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Occupant; 9] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
