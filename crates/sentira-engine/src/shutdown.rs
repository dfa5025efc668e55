//! Cancellation signalling for in-flight audit runs.

use tokio::sync::broadcast;

/// Broadcasts a cancellation signal to every subscribed audit run.
///
/// Clones share one channel: the orchestrator subscribes at run start, and
/// a single `shutdown()` call (typically wired to Ctrl-C) reaches all of
/// them. A cancelled run is discarded whole; see
/// [`AuditError::RunCancelled`](crate::AuditError::RunCancelled).
#[derive(Clone)]
pub struct ShutdownHandle {
    sender: broadcast::Sender<()>,
}

impl ShutdownHandle {
    /// Create a handle with no subscribers yet.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }

    /// Obtain a receiver that resolves once `shutdown` is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Signal cancellation to every current subscriber.
    pub fn shutdown(&self) {
        let _ = self.sender.send(());
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_reaches_every_subscriber() {
        let handle = ShutdownHandle::new();
        let mut first = handle.subscribe();
        let mut second = handle.clone().subscribe();

        handle.shutdown();

        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
    }
}
