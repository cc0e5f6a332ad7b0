//! Delayed-reply timers keyed by ticket.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::conversation::Ticket;

/// Tracks spawned sleep tasks so they can be flushed or aborted.
///
/// Each timer posts `on_fire(ticket)` to the channel once its delay has
/// elapsed. Aborting or dropping the registry stops every pending timer.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    pending: BTreeMap<Ticket, JoinHandle<()>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer that sends `event` after `delay`.
    pub fn schedule<E>(
        &mut self,
        ticket: Ticket,
        delay: Duration,
        tx: mpsc::UnboundedSender<E>,
        event: E,
    ) where
        E: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the session is dropped.
            let _ = tx.send(event);
        });
        if let Some(previous) = self.pending.insert(ticket, handle) {
            previous.abort();
        }
    }

    /// Forget a timer that has fired. Returns `false` for unknown tickets.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        self.pending.remove(&ticket).is_some()
    }

    #[cfg(test)]
    pub fn is_pending(&self, ticket: Ticket) -> bool {
        self.pending.contains_key(&ticket)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Abort every pending timer and return their tickets in schedule order.
    pub fn drain(&mut self) -> Vec<Ticket> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .map(|(ticket, handle)| {
                handle.abort();
                ticket
            })
            .collect()
    }

    pub fn abort_all(&mut self) {
        let aborted = self.drain();
        if !aborted.is_empty() {
            tracing::debug!(count = aborted.len(), "Aborted pending timers");
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerRegistry::new();
        timers.schedule(1, Duration::from_millis(300), tx, 1u64);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(1));
        assert!(timers.complete(1));
        assert!(!timers.complete(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_aborts_and_returns_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerRegistry::new();
        timers.schedule(3, Duration::from_secs(5), tx.clone(), 3u64);
        timers.schedule(2, Duration::from_secs(5), tx.clone(), 2u64);
        drop(tx);

        assert_eq!(timers.drain(), vec![2, 3]);
        assert!(timers.is_empty());

        tokio::time::sleep(Duration::from_secs(10)).await;
        // Both senders were dropped with the aborted tasks.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut timers = TimerRegistry::new();
            timers.schedule(1, Duration::from_secs(5), tx, 1u64);
            assert!(timers.is_pending(1));
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rx.recv().await, None);
    }
}
