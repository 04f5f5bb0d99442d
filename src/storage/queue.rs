//! FIFO queues keyed by composite key.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::storage::key::{CompositeKey, StorageType};

/// Unbounded FIFO of opaque string payloads.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    items: Arc<Mutex<VecDeque<String>>>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, value: impl Into<String>) {
        self.lock().push_back(value.into());
    }

    /// Remove and return the oldest element.
    pub fn dequeue(&self) -> Option<String> {
        self.lock().pop_front()
    }

    /// Return the oldest element without removing it.
    pub fn peek(&self) -> Option<String> {
        self.lock().front().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True when both handles refer to the same underlying queue.
    pub fn same_queue(&self, other: &Queue) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    // A panic while holding the lock cannot leave a VecDeque half-updated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lazily-created queues.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: DashMap<CompositeKey, Queue>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create: the first reference creates an empty queue.
    pub fn get_queue(&self, namespace: StorageType, name: &str) -> Queue {
        self.queues
            .entry(CompositeKey::new(namespace, name))
            .or_insert_with(|| {
                tracing::debug!(namespace = %namespace, name = %name, "Created queue");
                Queue::new()
            })
            .clone()
    }

    /// Drop a queue. Handles already given out keep working but are
    /// detached; the next `get_queue` creates a fresh one.
    pub fn delete_queue(&self, namespace: StorageType, name: &str) -> bool {
        self.queues
            .remove(&CompositeKey::new(namespace, name))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
