//! In-memory event source.
//!
//! Holds the listener table for one interaction target and delivers
//! events to it. The console driver feeds it from stdin; tests feed it
//! directly.

use std::collections::HashMap;
use std::sync::Mutex;

use futures::future::{self, BoxFuture};

use super::event::{EventKind, EventSource, InteractionEvent, Listener};

/// Listener table keyed by event kind.
///
/// Listeners for one kind are kept in registration order.
#[derive(Debug, Default)]
pub struct EventHub {
    listeners: Mutex<HashMap<EventKind, Vec<Listener>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.table().get(&kind).map_or(0, Vec::len)
    }

    /// Number of listeners across all kinds.
    pub fn total_listeners(&self) -> usize {
        self.table().values().map(Vec::len).sum()
    }

    /// Start every listener registered for the event's kind and return
    /// their futures without driving them.
    ///
    /// The listener table is snapshotted first, so listeners may
    /// subscribe or unsubscribe while the returned futures run.
    pub fn fire(&self, event: &InteractionEvent) -> Vec<BoxFuture<'static, ()>> {
        let snapshot: Vec<Listener> = self
            .table()
            .get(&event.kind())
            .cloned()
            .unwrap_or_default();
        snapshot
            .iter()
            .map(|listener| listener.call(event.clone()))
            .collect()
    }

    /// Deliver `event` and wait for every listener to finish.
    ///
    /// Returns the number of listeners invoked.
    pub async fn dispatch(&self, event: InteractionEvent) -> usize {
        let pending = self.fire(&event);
        let count = pending.len();
        tracing::trace!(kind = %event.kind(), listeners = count, "dispatch");
        future::join_all(pending).await;
        count
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<EventKind, Vec<Listener>>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventSource for EventHub {
    fn subscribe(&self, kind: EventKind, listener: Listener) {
        let mut table = self.table();
        let entry = table.entry(kind).or_default();
        if !entry.iter().any(|l| l.same(&listener)) {
            entry.push(listener);
        }
    }

    fn unsubscribe(&self, kind: EventKind, listener: &Listener) {
        let mut table = self.table();
        if let Some(entry) = table.get_mut(&kind) {
            entry.retain(|l| !l.same(listener));
            if entry.is_empty() {
                table.remove(&kind);
            }
        }
    }
}
