//! Staging queue — pending clipboard writes for gesture-restricted hosts.
//!
//! Copies are appended here instead of being written, and flushed by the
//! next qualifying gesture. Every pop takes the head under the lock, so
//! writes are issued in copy order even when several drains overlap.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// FIFO of copied text awaiting a write.
#[derive(Debug, Default)]
pub struct StagingQueue {
    entries: Mutex<VecDeque<String>>,
}

impl StagingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail. Safe while a drain is in flight: the entry is
    /// popped after everything queued before it.
    pub fn push(&self, text: String) {
        self.lock().push_back(text);
    }

    /// Take the head, `None` once the queue is empty.
    pub fn pop(&self) -> Option<String> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the queued entries, head first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
