//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! local fusion service. All types derive Serde traits for deserialization
//! from TOML files; environment overrides are applied afterwards by the
//! loader.

use serde::{Deserialize, Serialize};

/// Root configuration for the local fusion service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FusionConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Timeout configuration for the local RPC surface.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// EVM chain endpoints and mock mode.
    pub evm: EvmConfig,

    /// Solana JSON-RPC endpoint.
    pub solana: SolanaConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4000").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// EVM chain configuration.
///
/// Each built-in chain has its own endpoint field. Additional chains (or a
/// second endpoint for a built-in one) come from `custom_chain_configs`, a
/// JSON array of `{"blockchainType": ..., "rpcUrl": ...}` objects.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvmConfig {
    pub ethereum_rpc_url: String,
    pub polygon_rpc_url: String,
    pub bnb_rpc_url: String,
    pub avalanche_rpc_url: String,
    pub optimism_rpc_url: String,
    pub arbitrum_rpc_url: String,

    /// Raw JSON array of extra chain endpoints.
    pub custom_chain_configs: String,

    /// Return fixed synthetic results instead of calling endpoints.
    pub mock_mode: bool,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self {
            ethereum_rpc_url: "https://ethereum-rpc.publicnode.com".to_string(),
            polygon_rpc_url: "https://polygon-rpc.com".to_string(),
            bnb_rpc_url: "https://bsc-dataseed.binance.org".to_string(),
            avalanche_rpc_url: "https://api.avax.network/ext/bc/C/rpc".to_string(),
            optimism_rpc_url: "https://mainnet.optimism.io".to_string(),
            arbitrum_rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            custom_chain_configs: "[]".to_string(),
            mock_mode: false,
            rpc_timeout_secs: 10,
        }
    }
}

/// Solana JSON-RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolanaConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            rpc_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: FusionConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:4000");
        assert!(!config.evm.mock_mode);
        assert_eq!(config.evm.custom_chain_configs, "[]");
        assert_eq!(config.solana.rpc_url, "https://api.mainnet-beta.solana.com");
    }

    #[test]
    fn test_partial_section_override() {
        let raw = r#"
            [evm]
            mock_mode = true
            polygon_rpc_url = "http://localhost:8546"
        "#;
        let config: FusionConfig = toml::from_str(raw).unwrap();
        assert!(config.evm.mock_mode);
        assert_eq!(config.evm.polygon_rpc_url, "http://localhost:8546");
        // Untouched fields in the same section keep their defaults
        assert_eq!(config.evm.rpc_timeout_secs, 10);
    }
}
