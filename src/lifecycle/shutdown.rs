//! Stop request shared between the signal listener and the relay engine.
//!
//! The engine subscribes before its endpoint checks, so a stop requested
//! while it is still starting up is not missed.

use tokio::sync::broadcast;

/// Cloneable stop handle. Every clone feeds the same broadcast channel.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once `trigger` is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. A no-op when nobody is listening.
    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Stop requested with no running engine");
        }
    }

    /// Subscribers still waiting for a stop.
    pub fn waiters(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Shutdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shutdown")
            .field("waiters", &self.waiters())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_clone() {
        let shutdown = Shutdown::new();
        let handle = shutdown.clone();
        let mut engine = shutdown.subscribe();
        let mut other = handle.subscribe();
        assert_eq!(shutdown.waiters(), 2);

        handle.trigger();

        assert!(engine.recv().await.is_ok());
        assert!(other.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_subscribed_before_trigger_sees_it_later() {
        let shutdown = Shutdown::new();
        let mut stop = shutdown.subscribe();

        shutdown.trigger();
        tokio::task::yield_now().await;

        assert!(stop.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_subscribers() {
        let shutdown = Shutdown::default();
        shutdown.trigger();
        assert_eq!(shutdown.waiters(), 0);
        assert!(format!("{:?}", shutdown).contains("waiters"));
    }
}
