//! In-memory storage subsystem.
//!
//! # Data Flow
//! ```text
//! (StorageType, raw key)
//!     → key.rs (CompositeKey)
//!     → kv.rs (versioned put/get/delete)   ← both facades
//!     → queue.rs (get-or-create FIFO)      ← ephemeral facade only
//! ```
//!
//! # Design Decisions
//! - Process memory only; nothing survives a restart
//! - Maps are DashMap so concurrent handlers never race on an entry
//! - Missing keys and empty queues are `None`, never errors

pub mod facade;
pub mod key;
pub mod kv;
pub mod queue;
pub mod types;

pub use facade::{EphemeralStorage, PersistentStorage, StorageFacade};
pub use key::{CompositeKey, StorageType};
pub use kv::KeyValueStore;
pub use queue::{Queue, QueueRegistry};
pub use types::{StorageError, StorageResult, VersionedValue};
