//! Hand-off of gestures from the sampling context to the game context.
//!
//! Exactly one producer (the periodic sampler) and one consumer (the game
//! loop). Delivery is in production order. The consumer suspends until a
//! gesture arrives or the producer side shuts down; a full channel blocks the
//! producer rather than dropping gestures. At the sampling cadence the
//! channel never fills in practice, but the policy is explicit.

use crate::cursor::Gesture;
use tokio::sync::mpsc;
use tracing::trace;

/// Default channel capacity. Small and bounded: pending gestures beyond this
/// exert backpressure on the sampler.
pub const GESTURE_CAPACITY: usize = 8;

/// Creates a bounded gesture channel with [`GESTURE_CAPACITY`].
pub fn gesture_channel() -> (GestureSender, GestureReceiver) {
    let (tx, rx) = mpsc::channel(GESTURE_CAPACITY);
    (GestureSender { tx }, GestureReceiver { rx })
}

/// Producer half, held by the sampling task.
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: mpsc::Sender<Gesture>,
}

impl GestureSender {
    /// Sends one gesture, waiting for channel space if the consumer is behind.
    ///
    /// Returns `false` if the consumer has gone away, which tells the sampler
    /// to stop.
    pub async fn send(&self, gesture: Gesture) -> bool {
        trace!(?gesture, "gesture queued");
        self.tx.send(gesture).await.is_ok()
    }
}

/// Consumer half, held by the game loop.
#[derive(Debug)]
pub struct GestureReceiver {
    rx: mpsc::Receiver<Gesture>,
}

impl GestureReceiver {
    /// Receives the next gesture in production order.
    ///
    /// Suspends until a gesture is available; returns `None` once the sender
    /// is dropped and the channel drained (shutdown).
    pub async fn recv(&mut self) -> Option<Gesture> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delivery_preserves_order() {
        let (tx, mut rx) = gesture_channel();
        let produced = [Gesture::Right, Gesture::Down, Gesture::Left, Gesture::Up];
        for gesture in produced {
            assert!(tx.send(gesture).await);
        }
        for expected in produced {
            assert_eq!(rx.recv().await, Some(expected));
        }
    }

    #[tokio::test]
    async fn test_recv_sees_shutdown() {
        let (tx, mut rx) = gesture_channel();
        assert!(tx.send(Gesture::Left).await);
        drop(tx);
        assert_eq!(rx.recv().await, Some(Gesture::Left));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_send_reports_closed_consumer() {
        let (tx, rx) = gesture_channel();
        drop(rx);
        assert!(!tx.send(Gesture::Up).await);
    }

    #[tokio::test]
    async fn test_full_channel_blocks_producer() {
        let (tx, mut rx) = gesture_channel();
        for _ in 0..GESTURE_CAPACITY {
            assert!(tx.send(Gesture::Down).await);
        }
        // One more send must wait for the consumer rather than complete.
        let mut pending = Box::pin(tx.send(Gesture::Down));
        tokio::select! {
            biased;
            _ = &mut pending => panic!("send completed on a full channel"),
            _ = tokio::task::yield_now() => {}
        }
        assert_eq!(rx.recv().await, Some(Gesture::Down));
        assert!(pending.await);
    }
}
