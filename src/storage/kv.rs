//! Versioned key-value store.
//!
//! # Write rule
//! ```text
//! no entry for key            → install {version, value}, any version accepted
//! entry with other version    → replace wholesale with {version, value}
//! entry with same version     → reject with VersionConflict, entry untouched
//! ```
//!
//! The version stamp is a duplicate-write guard, not a compare-and-swap
//! counter: stamps need not increase, they only need to differ from the
//! stored one. Omitted versions default to `0`.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::observability::metrics;
use crate::storage::key::{CompositeKey, StorageType};
use crate::storage::types::{StorageError, StorageResult, VersionedValue};

/// A thread-safe map from composite key to versioned value.
#[derive(Debug)]
pub struct KeyValueStore {
    entries: DashMap<CompositeKey, VersionedValue>,
    /// Store label for logs and metrics ("ephemeral" / "persistent").
    label: &'static str,
}

impl KeyValueStore {
    pub fn new(label: &'static str) -> Self {
        Self {
            entries: DashMap::new(),
            label,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn get(&self, namespace: StorageType, key: &str) -> Option<VersionedValue> {
        self.entries
            .get(&CompositeKey::new(namespace, key))
            .map(|r| r.value().clone())
    }

    /// Write `value` under `version` (default `0`).
    pub fn put(
        &self,
        namespace: StorageType,
        key: &str,
        value: impl Into<String>,
        version: Option<u64>,
    ) -> StorageResult<()> {
        let version = version.unwrap_or(0);
        let composite = CompositeKey::new(namespace, key);

        // The shard guard must be released before len() below.
        let outcome = match self.entries.entry(composite) {
            Entry::Vacant(slot) => {
                slot.insert(VersionedValue::new(version, value));
                Ok(())
            }
            Entry::Occupied(mut slot) if slot.get().version != version => {
                slot.insert(VersionedValue::new(version, value));
                Ok(())
            }
            Entry::Occupied(slot) => Err(StorageError::VersionConflict {
                key: slot.key().clone(),
                version,
            }),
        };

        match &outcome {
            Ok(()) => metrics::record_kv_entries(self.label, self.entries.len()),
            Err(e) => {
                tracing::debug!(store = self.label, error = %e, "Rejected duplicate version write");
                metrics::record_version_conflict(self.label);
            }
        }
        outcome
    }

    /// Remove a key. Absent keys are a no-op.
    pub fn delete(&self, namespace: StorageType, key: &str) {
        if self.entries.remove(&CompositeKey::new(namespace, key)).is_some() {
            metrics::record_kv_entries(self.label, self.entries.len());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_accepts_any_version() {
        let store = KeyValueStore::new("test");
        store.put(StorageType::Global, "a", "v", Some(42)).unwrap();
        store.put(StorageType::Global, "b", "v", None).unwrap();

        assert_eq!(store.get(StorageType::Global, "a"), Some(VersionedValue::new(42, "v")));
        assert_eq!(store.get(StorageType::Global, "b"), Some(VersionedValue::new(0, "v")));
    }

    #[test]
    fn test_same_version_rejected_and_value_kept() {
        let store = KeyValueStore::new("test");
        store.put(StorageType::Source, "k", "v1", Some(7)).unwrap();

        let err = store.put(StorageType::Source, "k", "v2", Some(7)).unwrap_err();
        assert_eq!(
            err,
            StorageError::VersionConflict {
                key: CompositeKey::new(StorageType::Source, "k"),
                version: 7,
            }
        );
        assert_eq!(store.get(StorageType::Source, "k"), Some(VersionedValue::new(7, "v1")));
    }

    #[test]
    fn test_default_version_twice_conflicts() {
        let store = KeyValueStore::new("test");
        store.put(StorageType::Parser, "k", "v1", None).unwrap();
        assert!(store.put(StorageType::Parser, "k", "v2", None).is_err());
        assert!(store.put(StorageType::Parser, "k", "v2", Some(1)).is_ok());
    }

    #[test]
    fn test_lower_version_still_replaces() {
        let store = KeyValueStore::new("test");
        store.put(StorageType::Alert, "k", "v1", Some(10)).unwrap();
        store.put(StorageType::Alert, "k", "v2", Some(3)).unwrap();
        assert_eq!(store.get(StorageType::Alert, "k"), Some(VersionedValue::new(3, "v2")));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = KeyValueStore::new("test");
        store.delete(StorageType::Filter, "missing");

        store.put(StorageType::Filter, "k", "v", None).unwrap();
        store.delete(StorageType::Filter, "k");
        assert!(store.get(StorageType::Filter, "k").is_none());
        assert!(store.is_empty());

        // Deleted keys behave as never written
        store.put(StorageType::Filter, "k", "again", None).unwrap();
    }

    #[test]
    fn test_conflict_message_names_key() {
        let err = StorageError::VersionConflict {
            key: CompositeKey::new(StorageType::Global, "user-1"),
            version: 5,
        };
        assert!(err.to_string().contains("STORAGE_TYPE_GLOBALuser-1"));
        assert!(err.to_string().contains('5'));
    }
}
