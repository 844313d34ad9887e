//! Tiltactoe console demo.
//!
//! Stands in for device bring-up: stdin plays the motion sensor and the
//! commit button, stdout plays the display. The game core underneath is the
//! same wiring the device firmware runs.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tiltactoe::{
    FirstFree, Gesture, InputCommitHandler, MotionSensor, Occupant, Outcome, RepaintReceiver,
    Snapshot, TurnEngine, game_handle, gesture_channel, repaint_channel, run_game_loop,
    run_sampler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Play tic-tac-toe against the built-in opponent from the console.
#[derive(Debug, Parser)]
#[command(name = "tiltactoe", version, about)]
struct Cli {
    /// Sampling cadence in milliseconds.
    #[arg(long, default_value_t = 50)]
    cadence_ms: u64,
    /// Print each snapshot as JSON instead of drawing the board.
    #[arg(long)]
    json: bool,
}

/// Console stand-in for the motion sensor: each sampling cycle pops at most
/// one pending keyboard gesture, so the core sees the same one-gesture-per-
/// cycle contract the real sensor gives it.
struct ConsoleSensor {
    rx: mpsc::UnboundedReceiver<Gesture>,
}

#[async_trait::async_trait]
impl MotionSensor for ConsoleSensor {
    async fn sample(&mut self) -> Result<Option<Gesture>> {
        match self.rx.try_recv() {
            Ok(gesture) => Ok(Some(gesture)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                anyhow::bail!("motion input closed")
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!(cadence_ms = cli.cadence_ms, "starting console demo");

    let game = game_handle(TurnEngine::new(Box::new(FirstFree)));
    let (gesture_tx, gesture_rx) = gesture_channel();
    let (repaint_tx, repaint_rx) = repaint_channel();
    let button = InputCommitHandler::new(game.clone(), repaint_tx.clone());

    let (motion_tx, motion_rx) = mpsc::unbounded_channel();
    let sampler = tokio::spawn(run_sampler(
        ConsoleSensor { rx: motion_rx },
        gesture_tx,
        Duration::from_millis(cli.cadence_ms),
    ));
    let game_loop = tokio::spawn(run_game_loop(game.clone(), gesture_rx, repaint_tx));
    let renderer = tokio::spawn(render(repaint_rx, cli.json));

    println!("w/a/s/d tilt the cursor, Enter commits, n starts over, q quits.");
    button.reset().await; // paint the opening board

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {
                if let Err(error) = button.on_press().await {
                    println!("({error})");
                }
            }
            "n" => button.reset().await,
            "q" => break,
            other => {
                for ch in other.chars() {
                    let gesture = match ch {
                        'a' => Gesture::Left,
                        'd' => Gesture::Right,
                        'w' => Gesture::Up,
                        's' => Gesture::Down,
                        _ => {
                            warn!(input = %ch, "unrecognized input");
                            continue;
                        }
                    };
                    motion_tx.send(gesture)?;
                }
            }
        }
    }

    // Dropping the motion source and the button unwinds the task chain:
    // sampler, then game loop, then renderer.
    drop(motion_tx);
    drop(button);
    debug!("shutting down");
    let _ = sampler.await?;
    game_loop.await??;
    renderer.await??;

    Ok(())
}

/// Rendering task: draws every snapshot the core publishes.
async fn render(mut repaints: RepaintReceiver, json: bool) -> Result<()> {
    while let Some(snapshot) = repaints.recv().await {
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            print!("{}", draw(&snapshot));
        }
    }
    Ok(())
}

/// Formats a snapshot as a text grid. The cursor cell is bracketed and the
/// winning line is starred, matching the device display's highlight.
fn draw(snapshot: &Snapshot) -> String {
    let mut out = String::from("\n");
    for row in 0..3 {
        for col in 0..3 {
            let pos = row * 3 + col;
            let mark = match snapshot.board().get(pos) {
                Some(Occupant::Human) => 'X',
                Some(Occupant::Opponent) => 'O',
                _ => '.',
            };
            let highlighted = snapshot.winning_line().is_some_and(|line| line.contains(&pos));
            let cell = if pos == snapshot.cursor() {
                format!("[{mark}]")
            } else if highlighted {
                format!("*{mark}*")
            } else {
                format!(" {mark} ")
            };
            out.push_str(&cell);
            if col < 2 {
                out.push('|');
            }
        }
        if row < 2 {
            out.push_str("\n---+---+---\n");
        }
    }
    out.push('\n');
    out.push_str(match snapshot.outcome() {
        Outcome::InProgress => "your move\n",
        Outcome::WonBy(Occupant::Human) => "you win! n for a new game\n",
        Outcome::WonBy(_) => "the device wins. n for a new game\n",
        Outcome::Draw => "draw. n for a new game\n",
    });
    out
}
