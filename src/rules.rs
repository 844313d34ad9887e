//! Win and draw evaluation.
//!
//! Pure functions of the board. The outcome is always recomputed from cell
//! contents rather than stored, so it cannot drift from the board.

use crate::board::{Board, Occupant};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning lines as index triples, in fixed scan order:
/// rows top to bottom, columns left to right, then the two diagonals.
///
/// `evaluate` reports the first complete line in this order, which makes the
/// tie-break deterministic. Simultaneous completion of two lines by different
/// players cannot occur under alternating single placements.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Derived state of the running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has won.
    InProgress,
    /// A line of three is complete.
    WonBy(Occupant),
    /// Board full, no winner.
    Draw,
}

/// Evaluates the board for a winner or a draw.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(line) = winning_line(board) {
        // A winning line is uniform and non-empty, so any cell names the winner.
        if let Some(winner) = board.get(line[0]) {
            return Outcome::WonBy(winner);
        }
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Returns the first complete line in scan order, for highlighting at game
/// over, or `None` if no line is complete.
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    for line in LINES {
        let [a, b, c] = line;
        let occ = board.get(a);
        if occ != Some(Occupant::Empty) && occ == board.get(b) && occ == board.get(c) {
            return Some(line);
        }
    }
    None
}
