//! Cross-context wiring for the two execution contexts.
//!
//! The sampling loop and the game loop run as separate tasks, with the
//! button press arriving asynchronously relative to both. All board and
//! cursor mutations go through one shared [`TurnEngine`] behind a mutex, so
//! they form a linear, non-overlapping sequence; in particular the button
//! handler holds the lock across its whole commit-then-reply step, so
//! reading the cursor and placing at it is atomic with respect to
//! concurrent gestures.

use crate::channel::{GestureReceiver, GestureSender};
use crate::cursor::Gesture;
use crate::engine::{CommitError, Phase, Snapshot, TurnEngine};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, instrument};

/// The one live game, shared by the game loop and the button handler.
pub type GameHandle = Arc<Mutex<TurnEngine>>;

/// Wraps an engine into a shareable handle.
pub fn game_handle(engine: TurnEngine) -> GameHandle {
    Arc::new(Mutex::new(engine))
}

/// Sends repaint requests to the renderer. Fire-and-forget: the renderer
/// draws each snapshot as it arrives, and every snapshot reflects the board
/// as of a completed mutation.
pub type RepaintSender = mpsc::UnboundedSender<Snapshot>;

/// Receiver half for the rendering collaborator.
pub type RepaintReceiver = mpsc::UnboundedReceiver<Snapshot>;

/// Creates the repaint channel.
pub fn repaint_channel() -> (RepaintSender, RepaintReceiver) {
    mpsc::unbounded_channel()
}

/// Motion sensor collaborator.
///
/// The sensor owns its axis thresholds; the core only sees the classified
/// result. `Ok(None)` means no motion crossed a threshold this cycle, and no
/// gesture is forwarded for it.
#[async_trait::async_trait]
pub trait MotionSensor: Send {
    /// Reads and classifies one sampling cycle.
    ///
    /// # Errors
    ///
    /// An error is a sensor fault and stops the sampling loop.
    async fn sample(&mut self) -> Result<Option<Gesture>>;
}

/// Periodic sampling loop: one sensor read per cadence tick, forwarding any
/// classified gesture into the channel. A full channel blocks here rather
/// than dropping the gesture.
///
/// Returns when the consumer side is gone or the sensor faults.
#[instrument(skip(sensor, gestures))]
pub async fn run_sampler<S: MotionSensor>(
    mut sensor: S,
    gestures: GestureSender,
    cadence: Duration,
) -> Result<()> {
    info!(?cadence, "sampler started");
    loop {
        tokio::time::sleep(cadence).await;
        if let Some(gesture) = sensor.sample().await? {
            if !gestures.send(gesture).await {
                info!("game loop gone, sampler stopping");
                return Ok(());
            }
        }
    }
}

/// Main game loop: blocks on the gesture channel, applies each cursor move
/// under the game lock, and requests a repaint.
///
/// Returns once the sampler side shuts down, or errors if the renderer is
/// gone.
#[instrument(skip_all)]
pub async fn run_game_loop(
    game: GameHandle,
    mut gestures: GestureReceiver,
    repaint: RepaintSender,
) -> Result<()> {
    info!("game loop started");
    while let Some(gesture) = gestures.recv().await {
        let engine = &mut *game.lock().await;
        engine.apply_gesture(gesture);
        repaint.send(engine.snapshot())?;
    }
    info!("gesture channel closed, game loop exiting");
    Ok(())
}

/// Asynchronous entry point for the physical commit button.
///
/// The button collaborator debounces and edge-detects; this handler receives
/// one trigger per press. Safe to invoke concurrently with gesture
/// processing: the game lock serializes it against the game loop.
#[derive(Debug, Clone)]
pub struct InputCommitHandler {
    game: GameHandle,
    repaint: RepaintSender,
}

impl InputCommitHandler {
    /// Creates a handler over the shared game.
    pub fn new(game: GameHandle, repaint: RepaintSender) -> Self {
        Self { game, repaint }
    }

    /// Handles one button press: commit the human move at the cursor and,
    /// when the game continues, the opponent's reply lands before the lock
    /// is released.
    ///
    /// # Errors
    ///
    /// Propagates the engine's commit rejection; the game is unchanged and
    /// no repaint is requested for a rejected press.
    pub async fn on_press(&self) -> Result<Phase, CommitError> {
        let engine = &mut *self.game.lock().await;
        match engine.commit() {
            Ok(phase) => {
                debug!(?phase, "commit accepted");
                let _ = self.repaint.send(engine.snapshot());
                Ok(phase)
            }
            Err(error) => {
                debug!(%error, "commit rejected");
                Err(error)
            }
        }
    }

    /// Starts a fresh game and repaints the cleared board.
    pub async fn reset(&self) {
        let engine = &mut *self.game.lock().await;
        engine.reset();
        let _ = self.repaint.send(engine.snapshot());
    }
}
