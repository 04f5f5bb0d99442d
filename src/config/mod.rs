//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (ETHEREUM_RPC_URL, MOCK_MODE, ...)
//!     → validation.rs (semantic checks)
//!     → FusionConfig (validated, immutable)
//!     → consumed once at startup to build registries and the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Any load or validation error is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EvmConfig, FusionConfig, ListenerConfig, ObservabilityConfig, SolanaConfig};
