//! EVM client registry.
//!
//! # Responsibilities
//! - Dial one provider per configured chain at startup
//! - Serve balance and `eth_call` reads against the right chain
//! - Short-circuit every read with fixed values in mock mode
//!
//! The client map is built once in [`EvmClientRegistry::connect`] and never
//! mutated afterwards, so it is shared through `Arc` without locking.

use alloy::eips::BlockId;
use alloy::network::TransactionBuilder;
use alloy::primitives::{hex, Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, BlockchainType, ChainConfig, ChainFamily,
};
use crate::observability::metrics;

/// Balance returned in mock mode: 1 ETH in wei.
pub const MOCK_BALANCE: &str = "1000000000000000000";

/// `eth_call` result returned in mock mode.
pub const MOCK_CALL_RESULT: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000001";

type SharedProvider = Arc<dyn Provider + Send + Sync>;

/// One connected provider per EVM chain.
pub struct EvmClientRegistry {
    clients: HashMap<BlockchainType, SharedProvider>,
    mock_mode: bool,
    timeout_duration: Duration,
}

impl EvmClientRegistry {
    /// Dial every configured endpoint.
    ///
    /// A chain whose endpoint cannot be dialed is logged and left out; it
    /// never aborts startup. When the same chain appears more than once the
    /// last entry that connects wins.
    pub async fn connect(configs: &[ChainConfig], mock_mode: bool, rpc_timeout: Duration) -> Self {
        let mut clients = HashMap::new();

        for cfg in configs {
            if cfg.blockchain_type.family() != ChainFamily::Evm {
                tracing::warn!(
                    blockchain_type = %cfg.blockchain_type,
                    "Skipping non-EVM chain in EVM config"
                );
                continue;
            }

            match dial(&cfg.rpc_url, rpc_timeout).await {
                Ok(provider) => {
                    if clients.insert(cfg.blockchain_type, provider).is_some() {
                        tracing::debug!(
                            blockchain_type = %cfg.blockchain_type,
                            rpc_url = %cfg.rpc_url,
                            "Replaced earlier client for chain"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        blockchain_type = %cfg.blockchain_type,
                        rpc_url = %cfg.rpc_url,
                        error = %e,
                        "Failed to connect to blockchain; configure a different RPC URL"
                    );
                }
            }
        }

        metrics::record_evm_clients(clients.len());
        tracing::info!(
            connected = clients.len(),
            mock_mode = mock_mode,
            "EVM client registry initialized"
        );

        Self {
            clients,
            mock_mode,
            timeout_duration: rpc_timeout,
        }
    }

    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }

    pub fn is_connected(&self, chain: BlockchainType) -> bool {
        self.clients.contains_key(&chain)
    }

    /// Chains with a live client.
    pub fn chains(&self) -> Vec<BlockchainType> {
        self.clients.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Native balance of `address` as a decimal string.
    ///
    /// `block_number` is a `0x` hex string; `None`, `""` and `"latest"` all
    /// query the most recent block.
    pub async fn get_account_balance(
        &self,
        chain: BlockchainType,
        address: &str,
        block_number: Option<&str>,
    ) -> BlockchainResult<String> {
        if self.mock_mode {
            tracing::debug!(
                blockchain_type = %chain,
                account_address = %address,
                "MOCK_MODE enabled - returning fake balance"
            );
            return Ok(MOCK_BALANCE.to_string());
        }

        let provider = self.client(chain)?;
        let block = parse_block_number(block_number)?;
        let address = parse_address(address)?;

        tracing::debug!(
            blockchain_type = %chain,
            account_address = %address,
            block_number = ?block,
            "Getting account balance"
        );

        let mut request = provider.get_balance(address);
        if let Some(number) = block {
            request = request.block_id(BlockId::number(number));
        }

        match timeout(self.timeout_duration, request).await {
            Ok(Ok(balance)) => Ok(balance.to_string()),
            Ok(Err(e)) => {
                tracing::warn!(
                    blockchain_type = %chain,
                    account_address = %address,
                    error = %e,
                    "Failed to retrieve account balance"
                );
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Execute a read-only `eth_call` and return the result as bare hex.
    ///
    /// Live results carry no `0x` prefix; the mock result does.
    pub async fn make_call(
        &self,
        chain: BlockchainType,
        from: &str,
        to: &str,
        data: Option<&str>,
        block_number: Option<&str>,
    ) -> BlockchainResult<String> {
        if self.mock_mode {
            tracing::debug!(
                blockchain_type = %chain,
                to_address = %to,
                "MOCK_MODE enabled - returning fake eth call result"
            );
            return Ok(MOCK_CALL_RESULT.to_string());
        }

        let provider = self.client(chain)?;
        let block = parse_block_number(block_number)?;
        let tx = TransactionRequest::default()
            .with_from(parse_address(from)?)
            .with_to(parse_address(to)?)
            .with_input(parse_call_data(data)?);

        tracing::debug!(
            blockchain_type = %chain,
            from_address = %from,
            to_address = %to,
            block_number = ?block,
            "Making eth call"
        );

        let mut call = provider.call(tx);
        if let Some(number) = block {
            call = call.block(BlockId::number(number));
        }

        match timeout(self.timeout_duration, call).await {
            Ok(Ok(result)) => Ok(hex::encode(&result)),
            Ok(Err(e)) => {
                tracing::warn!(
                    blockchain_type = %chain,
                    to_address = %to,
                    error = %e,
                    "Failed to make eth call"
                );
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    fn client(&self, chain: BlockchainType) -> BlockchainResult<&SharedProvider> {
        if chain.family() != ChainFamily::Evm {
            return Err(BlockchainError::UnsupportedChain(chain));
        }
        self.clients.get(&chain).ok_or_else(|| {
            tracing::warn!(blockchain_type = %chain, "Failed to retrieve client for blockchain");
            BlockchainError::ClientNotFound { chain }
        })
    }
}

impl std::fmt::Debug for EvmClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmClientRegistry")
            .field("chains", &self.chains())
            .field("mock_mode", &self.mock_mode)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

async fn dial(rpc_url: &str, limit: Duration) -> BlockchainResult<SharedProvider> {
    let connect = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect(rpc_url);

    match timeout(limit, connect).await {
        Ok(Ok(provider)) => Ok(Arc::new(provider) as SharedProvider),
        Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
        Err(_) => Err(BlockchainError::Timeout(limit.as_secs())),
    }
}

/// `None`, `""` and `"latest"` mean the latest block.
pub fn parse_block_number(raw: Option<&str>) -> BlockchainResult<Option<u64>> {
    let raw = match raw.map(str::trim) {
        None | Some("") | Some("latest") => return Ok(None),
        Some(raw) => raw,
    };
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| {
            BlockchainError::InvalidArgument(format!(
                "block number '{}' is not 0x-prefixed hex",
                raw
            ))
        })?;

    u64::from_str_radix(digits, 16)
        .map(Some)
        .map_err(|e| BlockchainError::InvalidArgument(format!("block number '{}': {}", raw, e)))
}

fn parse_address(raw: &str) -> BlockchainResult<Address> {
    raw.trim()
        .parse()
        .map_err(|e| BlockchainError::InvalidArgument(format!("address '{}': {}", raw, e)))
}

fn parse_call_data(raw: Option<&str>) -> BlockchainResult<Bytes> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Bytes::new()),
        Some(raw) => hex::decode(raw)
            .map(Bytes::from)
            .map_err(|e| BlockchainError::InvalidArgument(format!("call data: {}", e))),
    }
}
