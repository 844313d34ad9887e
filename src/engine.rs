//! The turn state machine.
//!
//! [`TurnEngine`] is the single authoritative owner of board and cursor.
//! A committed human move runs the opponent's reply before control returns,
//! so callers observe whole turns, never a half-played exchange.

use crate::board::{Board, Occupant, PlaceError};
use crate::cursor::{Cursor, Gesture};
use crate::policy::OpponentPolicy;
use crate::rules::{self, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Phase of the running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to commit a move at the cursor.
    AwaitingHumanMove,
    /// Human has placed; the opponent's reply is in flight.
    AwaitingOpponentMove,
    /// Terminal for this game; only `reset` leaves it.
    GameOver(Outcome),
}

/// Errors surfaced by a commit attempt. Both are recoverable: the game state
/// is unchanged and the caller may simply try again later.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum CommitError {
    /// The cursor sits on an occupied cell.
    #[display("cannot commit: {_0}")]
    #[from]
    Occupied(PlaceError),
    /// The game is over or an opponent reply is in flight.
    #[display("no human move is expected right now")]
    NotHumanTurn,
}

/// Read-only view of the game handed to the renderer after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    board: Board,
    cursor: usize,
    outcome: Outcome,
    winning_line: Option<[usize; 3]>,
}

impl Snapshot {
    /// The board as of the most recent completed mutation.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Currently highlighted cell.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Outcome derived from the board.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The completed line, for highlighting once the game is won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }
}

/// Composes board, cursor and opponent policy into the per-event game step.
pub struct TurnEngine {
    board: Board,
    cursor: Cursor,
    phase: Phase,
    policy: Box<dyn OpponentPolicy>,
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("board", &self.board)
            .field("cursor", &self.cursor)
            .field("phase", &self.phase)
            .field("policy", &self.policy.name())
            .finish()
    }
}

impl TurnEngine {
    /// Creates an engine with an empty board, the cursor on the first free
    /// cell, and the human to move.
    pub fn new(policy: Box<dyn OpponentPolicy>) -> Self {
        let board = Board::new();
        let mut cursor = Cursor::default();
        cursor.snap_to_free(&board);
        Self {
            board,
            cursor,
            phase: Phase::AwaitingHumanMove,
            policy,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor.pos()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies one cursor gesture. Accepted in any phase except game over,
    /// and never touches the board or the turn state.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        if matches!(self.phase, Phase::GameOver(_)) {
            debug!(?gesture, "gesture ignored, game over");
            return;
        }
        self.cursor.apply(gesture);
    }

    /// Commits the human move at the current cursor and, if the game
    /// continues, plays the opponent's reply before returning.
    ///
    /// # Errors
    ///
    /// [`CommitError::Occupied`] if the cursor cell is taken and
    /// [`CommitError::NotHumanTurn`] outside `AwaitingHumanMove`; in both
    /// cases nothing changes.
    pub fn commit(&mut self) -> Result<Phase, CommitError> {
        if self.phase != Phase::AwaitingHumanMove {
            return Err(CommitError::NotHumanTurn);
        }
        let pos = self.cursor.pos();
        self.board.place(Occupant::Human, pos)?;
        info!(pos, "human move committed");

        match rules::evaluate(&self.board) {
            Outcome::InProgress => {
                self.phase = Phase::AwaitingOpponentMove;
                self.opponent_reply();
            }
            outcome => {
                info!(?outcome, "game over");
                self.phase = Phase::GameOver(outcome);
            }
        }
        Ok(self.phase)
    }

    /// Plays the opponent's reply and settles the next phase.
    fn opponent_reply(&mut self) {
        let Some(pos) = self.policy.select(&self.board) else {
            // No cell left to play; the human's move did not win, so the
            // board has run out as a draw.
            info!("opponent has no move available");
            self.phase = Phase::GameOver(Outcome::Draw);
            return;
        };

        if let Err(error) = self.board.place(Occupant::Opponent, pos) {
            // The policy contract is to return a free cell.
            warn!(%error, policy = self.policy.name(), "policy chose an occupied cell");
            self.phase = Phase::GameOver(rules::evaluate(&self.board));
            return;
        }
        info!(pos, "opponent move placed");

        match rules::evaluate(&self.board) {
            Outcome::InProgress => self.phase = Phase::AwaitingHumanMove,
            outcome => {
                info!(?outcome, "game over");
                self.phase = Phase::GameOver(outcome);
            }
        }
    }

    /// Discards the finished game: clears the board, snaps the cursor to the
    /// first free cell, and awaits the human again.
    pub fn reset(&mut self) {
        info!("game reset");
        self.board = Board::new();
        self.cursor.snap_to_free(&self.board);
        self.phase = Phase::AwaitingHumanMove;
    }

    /// Takes a read-only snapshot for the renderer. The outcome is
    /// recomputed from the board so the view can never diverge from it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            cursor: self.cursor.pos(),
            outcome: rules::evaluate(&self.board),
            winning_line: rules::winning_line(&self.board),
        }
    }
}
