//! Move selection for the built-in opponent.

use crate::board::Board;
use tracing::debug;

/// Strategy for choosing the opponent's next cell.
///
/// The engine calls this through a trait object so stronger strategies can be
/// swapped in without touching the turn logic.
pub trait OpponentPolicy: Send {
    /// Selects a cell for the opponent, or `None` if no move is available
    /// (board full).
    fn select(&self, board: &Board) -> Option<usize>;

    /// Display name for the strategy.
    fn name(&self) -> &str;
}

/// Placeholder strategy: plays the lowest-index free cell.
///
/// Intentionally not a strong player; it exists to exercise the turn cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFree;

impl OpponentPolicy for FirstFree {
    fn select(&self, board: &Board) -> Option<usize> {
        let choice = board.first_free();
        debug!(policy = self.name(), ?choice, "opponent selected move");
        choice
    }

    fn name(&self) -> &str {
        "first-free"
    }
}
