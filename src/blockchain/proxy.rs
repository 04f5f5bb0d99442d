//! Chain proxy selection by chain identifier.
//!
//! EVM chains are served by the typed-client registry, Solana by the raw
//! JSON-RPC proxy. Callers that only need chain-agnostic reads go through
//! [`ChainProxy`] and never branch on the family themselves.

use std::sync::Arc;

use crate::blockchain::evm::EvmClientRegistry;
use crate::blockchain::solana::SolanaProxy;
use crate::blockchain::types::{BlockchainResult, BlockchainType, ChainFamily};

/// A proxy able to serve one chain family.
#[derive(Debug, Clone)]
pub enum ChainProxy {
    Evm(Arc<EvmClientRegistry>),
    Solana(Arc<SolanaProxy>),
}

impl ChainProxy {
    pub fn family(&self) -> ChainFamily {
        match self {
            Self::Evm(_) => ChainFamily::Evm,
            Self::Solana(_) => ChainFamily::Solana,
        }
    }

    /// Native-token balance of `account` on `chain` as a decimal string
    /// (wei for EVM chains, lamports for Solana).
    pub async fn native_balance(
        &self,
        chain: BlockchainType,
        account: &str,
    ) -> BlockchainResult<String> {
        match self {
            Self::Evm(registry) => registry.get_account_balance(chain, account, None).await,
            Self::Solana(proxy) => proxy.get_balance_lamports(account).await,
        }
    }
}

/// All chain proxies, shared with request handlers.
#[derive(Debug, Clone)]
pub struct ChainProxies {
    evm: Arc<EvmClientRegistry>,
    solana: Arc<SolanaProxy>,
}

impl ChainProxies {
    pub fn new(evm: Arc<EvmClientRegistry>, solana: Arc<SolanaProxy>) -> Self {
        Self { evm, solana }
    }

    pub fn evm(&self) -> &EvmClientRegistry {
        &self.evm
    }

    pub fn solana(&self) -> &SolanaProxy {
        &self.solana
    }

    /// Pick the proxy for a chain identifier.
    pub fn resolve(&self, chain: BlockchainType) -> ChainProxy {
        match chain.family() {
            ChainFamily::Evm => ChainProxy::Evm(self.evm.clone()),
            ChainFamily::Solana => ChainProxy::Solana(self.solana.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::evm::MOCK_BALANCE;
    use std::time::Duration;

    async fn proxies(mock_mode: bool) -> ChainProxies {
        let evm = EvmClientRegistry::connect(&[], mock_mode, Duration::from_secs(1)).await;
        let solana = SolanaProxy::new("http://127.0.0.1:1", Duration::from_secs(1));
        ChainProxies::new(Arc::new(evm), Arc::new(solana))
    }

    #[tokio::test]
    async fn test_resolve_by_family() {
        let proxies = proxies(false).await;
        assert_eq!(proxies.resolve(BlockchainType::Solana).family(), ChainFamily::Solana);
        assert_eq!(proxies.resolve(BlockchainType::Base).family(), ChainFamily::Evm);
    }

    #[tokio::test]
    async fn test_evm_native_balance_in_mock_mode() {
        let proxies = proxies(true).await;
        let balance = proxies
            .resolve(BlockchainType::Arbitrum)
            .native_balance(BlockchainType::Arbitrum, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
            .await
            .unwrap();
        assert_eq!(balance, MOCK_BALANCE);
    }
}
