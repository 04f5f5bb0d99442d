//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::FusionConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Error parsing CUSTOM_CHAIN_CONFIGS json: {0}")]
    ChainConfig(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<FusionConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => FusionConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using the given lookup.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut FusionConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    let url_overrides: [(&str, &mut String); 7] = [
        ("ETHEREUM_RPC_URL", &mut config.evm.ethereum_rpc_url),
        ("POLYGON_RPC_URL", &mut config.evm.polygon_rpc_url),
        ("BNB_RPC_URL", &mut config.evm.bnb_rpc_url),
        ("AVALANCHE_RPC_URL", &mut config.evm.avalanche_rpc_url),
        ("OPTIMISM_RPC_URL", &mut config.evm.optimism_rpc_url),
        ("ARBITRUM_RPC_URL", &mut config.evm.arbitrum_rpc_url),
        ("SOLANA_RPC_URL", &mut config.solana.rpc_url),
    ];
    for (var, field) in url_overrides {
        if let Some(value) = get(var) {
            *field = value;
        }
    }

    if let Some(raw) = get("CUSTOM_CHAIN_CONFIGS") {
        config.evm.custom_chain_configs = raw;
    }
    if let Some(raw) = get("MOCK_MODE") {
        config.evm.mock_mode = parse_bool("MOCK_MODE", &raw)?;
    }
    if let Some(addr) = get("FUSION_BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    if let Some(level) = get("FUSION_LOG_LEVEL") {
        config.observability.log_level = level;
    }

    Ok(())
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::Env {
            var,
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}
