//! Assembles the list of chain endpoints the EVM registry dials at startup.
//!
//! Built-in chains come first, in fixed order, followed by the custom
//! entries in the order they appear in the JSON array. The list is not
//! deduplicated: a custom entry for a built-in chain yields a second entry,
//! and the registry keeps whichever connects last.

use crate::blockchain::types::{BlockchainType, ChainConfig};
use crate::config::{ConfigError, EvmConfig};

/// Built-in chain endpoints from the EVM configuration.
pub fn builtin_chain_configs(evm: &EvmConfig) -> Vec<ChainConfig> {
    vec![
        ChainConfig::new(BlockchainType::Ethereum, &evm.ethereum_rpc_url),
        ChainConfig::new(BlockchainType::Polygon, &evm.polygon_rpc_url),
        ChainConfig::new(BlockchainType::Binance, &evm.bnb_rpc_url),
        ChainConfig::new(BlockchainType::Avalanche, &evm.avalanche_rpc_url),
        ChainConfig::new(BlockchainType::Optimism, &evm.optimism_rpc_url),
        ChainConfig::new(BlockchainType::Arbitrum, &evm.arbitrum_rpc_url),
    ]
}

/// Parse the custom chain JSON array. Blank input means no custom chains.
pub fn parse_custom_chain_configs(raw: &str) -> Result<Vec<ChainConfig>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Built-in entries followed by the custom ones.
pub fn load_chain_configs(evm: &EvmConfig) -> Result<Vec<ChainConfig>, ConfigError> {
    let mut configs = builtin_chain_configs(evm);

    for custom in parse_custom_chain_configs(&evm.custom_chain_configs)? {
        tracing::info!(
            blockchain_type = %custom.blockchain_type,
            rpc_url = %custom.rpc_url,
            "Loaded custom chain config"
        );
        configs.push(custom);
    }

    Ok(configs)
}
