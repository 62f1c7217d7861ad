//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// How a drained task ended.
#[derive(Debug)]
pub enum DrainOutcome {
    /// The task finished within the deadline with this result.
    Finished(std::io::Result<()>),
    /// The task panicked or was cancelled.
    Aborted(tokio::task::JoinError),
    /// The deadline passed first; the task was aborted.
    TimedOut,
}

/// Wait up to `deadline` for a server task to finish draining.
pub async fn drain(mut task: JoinHandle<std::io::Result<()>>, deadline: Duration) -> DrainOutcome {
    match tokio::time::timeout(deadline, &mut task).await {
        Ok(Ok(result)) => DrainOutcome::Finished(result),
        Ok(Err(e)) => DrainOutcome::Aborted(e),
        Err(_) => {
            task.abort();
            DrainOutcome::TimedOut
        }
    }
}
