//! Tiltactoe - game core for a motion-controlled handheld tic-tac-toe device.
//!
//! A motion sensor steers a cursor over a 3x3 board and a physical button
//! commits the move, after which the built-in opponent replies. This crate
//! is the game-state engine and the synchronization layer between the two
//! execution contexts; sensor sampling detail, pixel drawing and device
//! bring-up live behind the narrow collaborator seams in the device module.
//!
//! # Architecture
//!
//! - **Board / rules**: the 9-cell grid and pure win/draw evaluation
//! - **Cursor**: bounded directional navigation, no wraparound
//! - **Channel**: bounded single-producer hand-off of gestures from the
//!   sampling task to the game loop
//! - **Policy**: swappable opponent move selection
//! - **Engine**: the turn state machine owning board and cursor
//! - **Device**: tasks, the shared game handle, and the button entry point
//!
//! # Example
//!
//! ```no_run
//! use tiltactoe::{
//!     FirstFree, InputCommitHandler, TurnEngine, game_handle, gesture_channel,
//!     repaint_channel, run_game_loop,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let game = game_handle(TurnEngine::new(Box::new(FirstFree)));
//! let (gesture_tx, gesture_rx) = gesture_channel();
//! let (repaint_tx, repaint_rx) = repaint_channel();
//!
//! // Button presses land here from the edge-detect collaborator.
//! let button = InputCommitHandler::new(game.clone(), repaint_tx.clone());
//!
//! tokio::spawn(run_game_loop(game, gesture_rx, repaint_tx));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod channel;
mod cursor;
mod device;
mod engine;
mod policy;
mod rules;

pub use board::{Board, Occupant, PlaceError};
pub use channel::{GESTURE_CAPACITY, GestureReceiver, GestureSender, gesture_channel};
pub use cursor::{Cursor, Gesture};
pub use device::{
    GameHandle, InputCommitHandler, MotionSensor, RepaintReceiver, RepaintSender, game_handle,
    repaint_channel, run_game_loop, run_sampler,
};
pub use engine::{CommitError, Phase, Snapshot, TurnEngine};
pub use policy::{FirstFree, OpponentPolicy};
pub use rules::{LINES, Outcome, evaluate, winning_line};
