//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. Every problem is
//! collected so a single startup attempt reports all of them.

use std::net::SocketAddr;
use thiserror::Error;

use crate::blockchain::loader::parse_custom_chain_configs;
use crate::config::schema::FusionConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}: timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("evm.custom_chain_configs: {0}")]
    CustomChainConfigs(String),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &FusionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let urls = [
        ("evm.ethereum_rpc_url", &config.evm.ethereum_rpc_url),
        ("evm.polygon_rpc_url", &config.evm.polygon_rpc_url),
        ("evm.bnb_rpc_url", &config.evm.bnb_rpc_url),
        ("evm.avalanche_rpc_url", &config.evm.avalanche_rpc_url),
        ("evm.optimism_rpc_url", &config.evm.optimism_rpc_url),
        ("evm.arbitrum_rpc_url", &config.evm.arbitrum_rpc_url),
        ("solana.rpc_url", &config.solana.rpc_url),
    ];
    for (field, value) in urls {
        if let Err(e) = url::Url::parse(value) {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
                reason: e.to_string(),
            });
        }
    }

    let timeouts = [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("evm.rpc_timeout_secs", config.evm.rpc_timeout_secs),
        ("solana.rpc_timeout_secs", config.solana.rpc_timeout_secs),
    ];
    for (field, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    // Endpoint URLs inside the custom list are dialed later and may fail
    // individually; only the JSON shape is fatal here.
    if let Err(e) = parse_custom_chain_configs(&config.evm.custom_chain_configs) {
        errors.push(ValidationError::CustomChainConfigs(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FusionConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FusionConfig::default();
        config.evm.ethereum_rpc_url = "not a url".to_string();
        config.evm.rpc_timeout_secs = 0;
        config.listener.bind_address = "localhost".to_string();
        config.evm.custom_chain_configs = "{oops".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout("evm.rpc_timeout_secs")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::CustomChainConfigs(_))));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = FusionConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
