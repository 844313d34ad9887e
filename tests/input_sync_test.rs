//! Cross-context synchronization tests: gestures and button presses racing
//! against each other over the shared game.

use std::time::Duration;
use tiltactoe::{
    FirstFree, Gesture, InputCommitHandler, Occupant, Outcome, Phase, Snapshot, TurnEngine,
    game_handle, gesture_channel, repaint_channel, run_game_loop,
};

fn count(snapshot: &Snapshot, occ: Occupant) -> usize {
    snapshot.board().cells().iter().filter(|c| **c == occ).count()
}

#[tokio::test]
async fn test_interleaved_gestures_and_presses_keep_invariants() {
    let game = game_handle(TurnEngine::new(Box::new(FirstFree)));
    let (gesture_tx, gesture_rx) = gesture_channel();
    let (repaint_tx, mut repaint_rx) = repaint_channel();
    let handler = InputCommitHandler::new(game.clone(), repaint_tx.clone());

    let game_loop = tokio::spawn(run_game_loop(game.clone(), gesture_rx, repaint_tx));

    // Context (a): a burst of gestures walking the cursor around the grid.
    let producer = tokio::spawn(async move {
        let walk = [Gesture::Right, Gesture::Down, Gesture::Left, Gesture::Up];
        for step in 0..40 {
            gesture_tx.send(walk[step % walk.len()]).await;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    });

    // The preemptive button: presses landing at arbitrary points of the
    // gesture stream. Rejections (occupied cell, game already over) are
    // part of normal operation here.
    let presser = {
        let handler = handler.clone();
        tokio::spawn(async move {
            let mut accepted = 0usize;
            for _ in 0..8 {
                tokio::time::sleep(Duration::from_millis(3)).await;
                if handler.on_press().await.is_ok() {
                    accepted += 1;
                }
            }
            accepted
        })
    };

    producer.await.expect("producer task");
    let accepted = presser.await.expect("presser task");
    game_loop
        .await
        .expect("game loop task")
        .expect("renderer alive");
    drop(handler);

    // Every published snapshot is a consistent post-mutation view: the
    // cursor in range, occupancy only ever growing, and never a human piece
    // missing its reply mid-game (commit-then-reply is one critical section).
    let mut last_occupied = 0;
    while let Some(snapshot) = repaint_rx.recv().await {
        assert!(snapshot.cursor() <= 8, "cursor escaped the grid");
        let humans = count(&snapshot, Occupant::Human);
        let opponents = count(&snapshot, Occupant::Opponent);
        assert!(
            humans + opponents >= last_occupied,
            "board lost a piece between repaints"
        );
        last_occupied = humans + opponents;
        if snapshot.outcome() == Outcome::InProgress {
            assert_eq!(humans, opponents, "half-played turn became visible");
        }
    }

    // No cell is ever written twice, so the final counts must balance
    // against the number of accepted presses.
    let engine = game.lock().await;
    let snapshot = engine.snapshot();
    let humans = count(&snapshot, Occupant::Human);
    let opponents = count(&snapshot, Occupant::Opponent);
    assert_eq!(humans, accepted);
    assert!(opponents == humans || opponents + 1 == humans);
}

#[tokio::test]
async fn test_press_commits_at_the_settled_cursor() {
    let game = game_handle(TurnEngine::new(Box::new(FirstFree)));
    let (gesture_tx, gesture_rx) = gesture_channel();
    let (repaint_tx, mut repaint_rx) = repaint_channel();
    let handler = InputCommitHandler::new(game.clone(), repaint_tx.clone());

    let game_loop = tokio::spawn(run_game_loop(game.clone(), gesture_rx, repaint_tx));

    // Steer to the center, then let the stream drain before pressing.
    assert!(gesture_tx.send(Gesture::Right).await);
    assert!(gesture_tx.send(Gesture::Down).await);
    assert_eq!(repaint_rx.recv().await.expect("repaint").cursor(), 1);
    assert_eq!(repaint_rx.recv().await.expect("repaint").cursor(), 4);

    let phase = handler.on_press().await.expect("free cell");
    assert_eq!(phase, Phase::AwaitingHumanMove);
    let snapshot = repaint_rx.recv().await.expect("repaint after press");
    assert_eq!(snapshot.board().get(4), Some(Occupant::Human));
    assert_eq!(snapshot.board().get(0), Some(Occupant::Opponent));

    drop(gesture_tx);
    game_loop
        .await
        .expect("game loop task")
        .expect("renderer alive");
}

#[tokio::test]
async fn test_gestures_after_game_over_leave_state_terminal() {
    let game = game_handle(TurnEngine::new(Box::new(FirstFree)));
    let (gesture_tx, gesture_rx) = gesture_channel();
    let (repaint_tx, mut repaint_rx) = repaint_channel();
    let handler = InputCommitHandler::new(game.clone(), repaint_tx.clone());

    let game_loop = tokio::spawn(run_game_loop(game.clone(), gesture_rx, repaint_tx));

    // Drive the human to a middle-row win: commit at 3, 4, 5, steering the
    // cursor between presses and waiting for each repaint so the sequence
    // is deterministic.
    assert!(gesture_tx.send(Gesture::Down).await);
    assert_eq!(repaint_rx.recv().await.expect("repaint").cursor(), 3);
    handler.on_press().await.expect("free cell");
    repaint_rx.recv().await.expect("repaint after press");

    assert!(gesture_tx.send(Gesture::Right).await);
    assert_eq!(repaint_rx.recv().await.expect("repaint").cursor(), 4);
    handler.on_press().await.expect("free cell");
    repaint_rx.recv().await.expect("repaint after press");

    assert!(gesture_tx.send(Gesture::Right).await);
    assert_eq!(repaint_rx.recv().await.expect("repaint").cursor(), 5);
    let phase = handler.on_press().await.expect("free cell");
    assert_eq!(phase, Phase::GameOver(Outcome::WonBy(Occupant::Human)));
    let won = repaint_rx.recv().await.expect("repaint after win");
    assert_eq!(won.winning_line(), Some([3, 4, 5]));

    // Late gestures still repaint but no longer move anything, and a late
    // press bounces off the terminal state.
    assert!(gesture_tx.send(Gesture::Up).await);
    let after = repaint_rx.recv().await.expect("repaint after late gesture");
    assert_eq!(after.cursor(), 5);
    assert_eq!(after.board(), won.board());
    assert!(handler.on_press().await.is_err());

    drop(gesture_tx);
    game_loop
        .await
        .expect("game loop task")
        .expect("renderer alive");
}
