//! Storage namespaces and composite keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CANONICAL_PREFIX: &str = "STORAGE_TYPE_";

/// Storage namespace discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageType {
    Global,
    Source,
    Parser,
    Filter,
    Alert,
}

impl StorageType {
    pub const ALL: [StorageType; 5] = [
        Self::Global,
        Self::Source,
        Self::Parser,
        Self::Filter,
        Self::Alert,
    ];

    fn short_name(self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Source => "SOURCE",
            Self::Parser => "PARSER",
            Self::Filter => "FILTER",
            Self::Alert => "ALERT",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CANONICAL_PREFIX, self.short_name())
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix(CANONICAL_PREFIX).unwrap_or(&upper);
        Self::ALL
            .into_iter()
            .find(|ty| ty.short_name() == name)
            .ok_or_else(|| format!("unknown storage type '{}'", s))
    }
}

impl TryFrom<String> for StorageType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StorageType> for String {
    fn from(ty: StorageType) -> Self {
        ty.to_string()
    }
}

/// Lookup key for stores and queues: namespace plus raw key.
///
/// Renders as the namespace's canonical name followed by the raw key.
/// Equality compares both parts, so keys from different namespaces never
/// collide even when their rendered strings would.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    namespace: StorageType,
    key: String,
}

impl CompositeKey {
    pub fn new(namespace: StorageType, key: impl Into<String>) -> Self {
        Self {
            namespace,
            key: key.into(),
        }
    }

    pub fn namespace(&self) -> StorageType {
        self.namespace
    }

    pub fn raw_key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.key)
    }
}
