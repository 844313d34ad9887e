//! Cursor navigation over the grid.

use crate::board::Board;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One discrete directional cursor-move request.
///
/// Gestures arrive from the motion sampler already classified; "no motion this
/// cycle" is expressed by not producing a gesture at all, never by a variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Gesture {
    /// Tilt left: one column to the left.
    Left,
    /// Tilt right: one column to the right.
    Right,
    /// Tilt away: one row up.
    Up,
    /// Tilt toward: one row down.
    Down,
}

/// The currently highlighted cell, always in `[0, 8]`.
///
/// Boundary-crossing gestures are silent no-ops: there is no wraparound, and
/// a rejected move is observable only as an unchanged position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pos: usize,
}

impl Cursor {
    /// Creates a cursor at the given position, clamped into range.
    pub fn new(pos: usize) -> Self {
        Self { pos: pos.min(8) }
    }

    /// Returns the current position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Applies one gesture, rejecting moves off the edge of the grid.
    pub fn apply(&mut self, gesture: Gesture) {
        let next = match gesture {
            Gesture::Left if self.pos % 3 != 0 => self.pos - 1,
            Gesture::Right if (self.pos + 1) % 3 != 0 => self.pos + 1,
            Gesture::Up if self.pos >= 3 => self.pos - 3,
            Gesture::Down if self.pos < 6 => self.pos + 3,
            _ => {
                trace!(?gesture, pos = self.pos, "gesture rejected at boundary");
                return;
            }
        };
        trace!(?gesture, from = self.pos, to = next, "cursor moved");
        self.pos = next;
    }

    /// Snaps to the lowest free cell on the board, used at game start.
    /// Position is unchanged if the board is full.
    pub fn snap_to_free(&mut self, board: &Board) {
        if let Some(pos) = board.first_free() {
            self.pos = pos;
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self { pos: 0 }
    }
}
