//! Local Fusion: in-process storage and chain-RPC emulation.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::FusionConfig;
pub use http::FusionServer;
pub use lifecycle::Shutdown;
