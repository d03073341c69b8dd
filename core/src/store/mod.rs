//! Telemetry store — the single owner of the current snapshot.
//!
//! RULE: Only the engine writes to the store, and only by replacing the
//! whole snapshot. Readers get an `Arc` to an immutable snapshot and can
//! never observe a half-applied tick.

pub mod building;
pub mod cleanliness;
pub mod log;
pub mod room;
pub mod security;
pub mod solar;

use crate::snapshot::TelemetrySnapshot;
use std::sync::Arc;
use tokio::sync::watch;

pub type SharedSnapshot = Arc<TelemetrySnapshot>;

pub struct TelemetryStore {
    tx: watch::Sender<SharedSnapshot>,
}

impl TelemetryStore {
    pub fn new(initial: TelemetrySnapshot) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> SharedSnapshot {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver that is notified after every publish.
    pub fn subscribe(&self) -> watch::Receiver<SharedSnapshot> {
        self.tx.subscribe()
    }

    /// Replace the snapshot wholesale and wake subscribers.
    /// Works with zero subscribers attached.
    pub(crate) fn publish(&self, next: TelemetrySnapshot) {
        let tick = next.tick;
        self.tx.send_replace(Arc::new(next));
        ::log::trace!("tick={tick} snapshot published");
    }
}
