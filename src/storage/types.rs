//! Stored value and storage error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::key::CompositeKey;

/// Latest state of one logical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedValue {
    pub version: u64,
    pub value: String,
}

impl VersionedValue {
    pub fn new(version: u64, value: impl Into<String>) -> Self {
        Self {
            version,
            value: value.into(),
        }
    }
}

/// Errors raised by the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A write reused the version stamp already stored for this key.
    #[error("Version conflict for key {key}: version {version} is already stored")]
    VersionConflict { key: CompositeKey, version: u64 },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
