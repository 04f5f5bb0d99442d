//! Blockchain proxy subsystem.
//!
//! # Data Flow
//! ```text
//! EvmConfig (built-in URLs + CUSTOM_CHAIN_CONFIGS json)
//!     → loader.rs (uniform ChainConfig list)
//!     → evm.rs (one provider per chain, dialed once at startup)
//!
//! SolanaConfig (single endpoint)
//!     → solana.rs (envelope builders + one POST per call)
//!
//! proxy.rs picks evm or solana by chain identifier
//! ```
//!
//! # Constraints
//! - A bad endpoint never aborts startup; that chain is simply absent
//! - Mock mode answers EVM reads before any client lookup
//! - Every outbound call has a deadline; nothing is retried here

pub mod evm;
pub mod loader;
pub mod proxy;
pub mod solana;
pub mod types;

pub use evm::EvmClientRegistry;
pub use proxy::{ChainProxies, ChainProxy};
pub use solana::{ProgramAccountsOptions, RpcRequest, SolanaProxy};
pub use types::{BlockchainError, BlockchainResult, BlockchainType, ChainConfig, ChainFamily};
