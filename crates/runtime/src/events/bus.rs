//! Broadcast event bus.

use tokio::sync::broadcast;

use combat_core::CombatEvent;

use super::EventKind;

/// Fan-out channel for engine events.
///
/// Publishing never blocks: a slow subscriber lags and loses the oldest
/// events instead of stalling the encounter.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: CombatEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!(target: "combat::runtime", "event dropped, no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.tx.subscribe()
    }

    /// Subscribes and keeps only events of the given kinds.
    pub fn subscribe_filtered(&self, kinds: &[EventKind]) -> FilteredReceiver {
        FilteredReceiver {
            rx: self.tx.subscribe(),
            kinds: kinds.to_vec(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver that skips events outside a set of kinds.
pub struct FilteredReceiver {
    rx: broadcast::Receiver<CombatEvent>,
    kinds: Vec<EventKind>,
}

impl FilteredReceiver {
    /// Waits for the next matching event. Returns `None` once the bus is
    /// closed; lagged events are skipped.
    pub async fn recv(&mut self) -> Option<CombatEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.kinds.contains(&EventKind::of(&event)) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(target: "combat::runtime", skipped, "filtered subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
