//! Storage facades.
//!
//! Both variants expose their key-value store through [`StorageFacade`].
//! Each owns a separate store, so the same raw key written through the
//! ephemeral facade is invisible through the persistent one. Neither
//! variant touches disk; "persistent" names a separate in-memory namespace
//! that a durable engine could later sit behind.

use crate::storage::key::StorageType;
use crate::storage::kv::KeyValueStore;
use crate::storage::queue::{Queue, QueueRegistry};

/// Capability shared by every storage facade.
pub trait StorageFacade: Send + Sync {
    fn store(&self) -> &KeyValueStore;
}

/// Key-value store plus lazily-created queues.
#[derive(Debug)]
pub struct EphemeralStorage {
    store: KeyValueStore,
    queues: QueueRegistry,
}

impl EphemeralStorage {
    pub fn new() -> Self {
        Self {
            store: KeyValueStore::new("ephemeral"),
            queues: QueueRegistry::new(),
        }
    }

    pub fn queues(&self) -> &QueueRegistry {
        &self.queues
    }

    pub fn get_queue(&self, namespace: StorageType, name: &str) -> Queue {
        self.queues.get_queue(namespace, name)
    }
}

impl Default for EphemeralStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageFacade for EphemeralStorage {
    fn store(&self) -> &KeyValueStore {
        &self.store
    }
}

/// Key-value store only.
#[derive(Debug)]
pub struct PersistentStorage {
    store: KeyValueStore,
}

impl PersistentStorage {
    pub fn new() -> Self {
        Self {
            store: KeyValueStore::new("persistent"),
        }
    }
}

impl Default for PersistentStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageFacade for PersistentStorage {
    fn store(&self) -> &KeyValueStore {
        &self.store
    }
}
