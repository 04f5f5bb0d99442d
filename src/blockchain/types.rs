//! Chain identifiers, endpoint configuration and error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix carried by canonical chain names.
const CANONICAL_PREFIX: &str = "BLOCKCHAIN_TYPE_";

/// Blockchain network identifier.
///
/// Accepted on the wire either as its numeric code or as a name
/// (`"BLOCKCHAIN_TYPE_ETHEREUM"`, `"ETHEREUM"` and `"ethereum"` are all
/// equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBlockchainType", into = "String")]
pub enum BlockchainType {
    Solana = 1,
    Ethereum = 2,
    Polygon = 3,
    Arbitrum = 4,
    Binance = 5,
    Optimism = 6,
    Avalanche = 7,
    Base = 8,
    Linea = 9,
    Scroll = 10,
    Blast = 11,
    Celo = 12,
    Mantle = 13,
    Zksync = 14,
}

/// Protocol family a chain speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFamily {
    Evm,
    Solana,
}

impl BlockchainType {
    pub const ALL: [BlockchainType; 14] = [
        Self::Solana,
        Self::Ethereum,
        Self::Polygon,
        Self::Arbitrum,
        Self::Binance,
        Self::Optimism,
        Self::Avalanche,
        Self::Base,
        Self::Linea,
        Self::Scroll,
        Self::Blast,
        Self::Celo,
        Self::Mantle,
        Self::Zksync,
    ];

    /// Short upper-case name without the canonical prefix.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Solana => "SOLANA",
            Self::Ethereum => "ETHEREUM",
            Self::Polygon => "POLYGON",
            Self::Arbitrum => "ARBITRUM",
            Self::Binance => "BINANCE",
            Self::Optimism => "OPTIMISM",
            Self::Avalanche => "AVALANCHE",
            Self::Base => "BASE",
            Self::Linea => "LINEA",
            Self::Scroll => "SCROLL",
            Self::Blast => "BLAST",
            Self::Celo => "CELO",
            Self::Mantle => "MANTLE",
            Self::Zksync => "ZKSYNC",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn family(self) -> ChainFamily {
        match self {
            Self::Solana => ChainFamily::Solana,
            _ => ChainFamily::Evm,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.code() == code)
    }
}

impl fmt::Display for BlockchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CANONICAL_PREFIX, self.short_name())
    }
}

impl FromStr for BlockchainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix(CANONICAL_PREFIX).unwrap_or(&upper);
        let chain = match name {
            "BNB" | "BSC" => Some(Self::Binance),
            "AVAX" => Some(Self::Avalanche),
            _ => Self::ALL.into_iter().find(|chain| chain.short_name() == name),
        };
        chain.ok_or_else(|| format!("unknown blockchain type '{}'", s))
    }
}

/// Wire form of a chain identifier: enum name or numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlockchainType {
    Code(i64),
    Name(String),
}

impl TryFrom<RawBlockchainType> for BlockchainType {
    type Error = String;

    fn try_from(raw: RawBlockchainType) -> Result<Self, Self::Error> {
        match raw {
            RawBlockchainType::Code(code) => Self::from_code(code)
                .ok_or_else(|| format!("unknown blockchain type code {}", code)),
            RawBlockchainType::Name(name) => name.parse(),
        }
    }
}

impl From<BlockchainType> for String {
    fn from(chain: BlockchainType) -> Self {
        chain.to_string()
    }
}

/// One RPC endpoint for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub blockchain_type: BlockchainType,
    pub rpc_url: String,
}

impl ChainConfig {
    pub fn new(blockchain_type: BlockchainType, rpc_url: impl Into<String>) -> Self {
        Self {
            blockchain_type,
            rpc_url: rpc_url.into(),
        }
    }
}

/// Errors that can occur during chain proxy operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// No client was registered for this chain at startup.
    #[error("Client not found for blockchain type {chain}")]
    ClientNotFound { chain: BlockchainType },

    /// The chain exists but the requested proxy cannot serve it.
    #[error("Operation not supported for blockchain type {0}")]
    UnsupportedChain(BlockchainType),

    /// Caller supplied a malformed address, block number or payload.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Upstream answered with something we could not decode.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for chain proxy operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("ETHEREUM".parse::<BlockchainType>(), Ok(BlockchainType::Ethereum));
        assert_eq!(
            "BLOCKCHAIN_TYPE_POLYGON".parse::<BlockchainType>(),
            Ok(BlockchainType::Polygon)
        );
        assert_eq!("bsc".parse::<BlockchainType>(), Ok(BlockchainType::Binance));
        assert!("DOGECOIN".parse::<BlockchainType>().is_err());
    }

    #[test]
    fn test_codes_round_trip() {
        for chain in BlockchainType::ALL {
            assert_eq!(BlockchainType::from_code(chain.code()), Some(chain));
        }
        assert_eq!(BlockchainType::from_code(0), None);
    }

    #[test]
    fn test_chain_config_accepts_name_or_number() {
        let by_name: ChainConfig =
            serde_json::from_str(r#"{"blockchainType":"ARBITRUM","rpcUrl":"http://a"}"#).unwrap();
        assert_eq!(by_name.blockchain_type, BlockchainType::Arbitrum);

        let by_code: ChainConfig =
            serde_json::from_str(r#"{"blockchainType":8,"rpcUrl":"http://b"}"#).unwrap();
        assert_eq!(by_code.blockchain_type, BlockchainType::Base);

        let unknown = serde_json::from_str::<ChainConfig>(r#"{"blockchainType":99,"rpcUrl":"x"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_family() {
        assert_eq!(BlockchainType::Solana.family(), ChainFamily::Solana);
        assert_eq!(BlockchainType::Optimism.family(), ChainFamily::Evm);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::ClientNotFound {
            chain: BlockchainType::Avalanche,
        };
        assert_eq!(
            err.to_string(),
            "Client not found for blockchain type BLOCKCHAIN_TYPE_AVALANCHE"
        );
        assert_eq!(
            BlockchainError::Timeout(10).to_string(),
            "RPC timeout after 10 seconds"
        );
    }
}
