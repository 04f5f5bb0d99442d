//! EVM and Solana proxies against a local mock JSON-RPC backend.

use serde_json::{json, Value};
use std::time::Duration;

use local_fusion::blockchain::{
    BlockchainError, BlockchainType, ChainConfig, EvmClientRegistry, ProgramAccountsOptions,
    SolanaProxy,
};

mod common;

const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn method(request: &Value) -> &str {
    request["method"].as_str().unwrap_or_default()
}

async fn evm_backend() -> common::MockRpc {
    common::start_mock_rpc(|request| match method(request) {
        "eth_getBalance" => json!("0xde0b6b3a7640000"),
        "eth_call" => json!("0x000000000000000000000000000000000000000000000000000000000000002a"),
        _ => Value::Null,
    })
    .await
}

#[tokio::test]
async fn test_evm_balance_through_provider() {
    let backend = evm_backend().await;
    let registry = EvmClientRegistry::connect(
        &[ChainConfig::new(BlockchainType::Polygon, backend.url())],
        false,
        Duration::from_secs(2),
    )
    .await;
    assert!(registry.is_connected(BlockchainType::Polygon));

    let balance = registry
        .get_account_balance(BlockchainType::Polygon, ADDRESS, None)
        .await
        .unwrap();
    assert_eq!(balance, "1000000000000000000");

    let request = backend.last();
    assert_eq!(method(&request), "eth_getBalance");
    assert_eq!(
        request["params"][0].as_str().unwrap().to_lowercase(),
        ADDRESS.to_lowercase()
    );
    assert_eq!(request["params"][1], json!("latest"));
}

#[tokio::test]
async fn test_evm_balance_at_block() {
    let backend = evm_backend().await;
    let registry = EvmClientRegistry::connect(
        &[ChainConfig::new(BlockchainType::Ethereum, backend.url())],
        false,
        Duration::from_secs(2),
    )
    .await;

    registry
        .get_account_balance(BlockchainType::Ethereum, ADDRESS, Some("0x10"))
        .await
        .unwrap();
    assert_eq!(backend.last()["params"][1], json!("0x10"));
}

#[tokio::test]
async fn test_evm_call_returns_bare_hex() {
    let backend = evm_backend().await;
    let registry = EvmClientRegistry::connect(
        &[ChainConfig::new(BlockchainType::Base, backend.url())],
        false,
        Duration::from_secs(2),
    )
    .await;

    let result = registry
        .make_call(BlockchainType::Base, ADDRESS, TOKEN, Some("0x70a08231"), None)
        .await
        .unwrap();
    assert_eq!(
        result,
        "000000000000000000000000000000000000000000000000000000000000002a"
    );

    let request = backend.last();
    assert_eq!(method(&request), "eth_call");
    assert_eq!(
        request["params"][0]["to"].as_str().unwrap().to_lowercase(),
        TOKEN.to_lowercase()
    );
}

#[tokio::test]
async fn test_later_entry_for_same_chain_wins() {
    let first = common::start_mock_rpc(|_| json!("0x1")).await;
    let second = common::start_mock_rpc(|_| json!("0x2")).await;
    let registry = EvmClientRegistry::connect(
        &[
            ChainConfig::new(BlockchainType::Ethereum, first.url()),
            ChainConfig::new(BlockchainType::Ethereum, second.url()),
        ],
        false,
        Duration::from_secs(2),
    )
    .await;
    assert_eq!(registry.len(), 1);

    let balance = registry
        .get_account_balance(BlockchainType::Ethereum, ADDRESS, None)
        .await
        .unwrap();
    assert_eq!(balance, "2");
    assert!(first.received().is_empty());
    assert_eq!(second.received().len(), 1);
}

#[tokio::test]
async fn test_mock_mode_never_reaches_backend() {
    let backend = evm_backend().await;
    let registry = EvmClientRegistry::connect(
        &[ChainConfig::new(BlockchainType::Ethereum, backend.url())],
        true,
        Duration::from_secs(2),
    )
    .await;

    let balance = registry
        .get_account_balance(BlockchainType::Ethereum, ADDRESS, None)
        .await
        .unwrap();
    assert_eq!(balance, "1000000000000000000");
    assert!(backend.received().is_empty());
}

#[tokio::test]
async fn test_solana_balance_lamports() {
    let backend = common::start_mock_rpc(|request| match method(request) {
        "getBalance" => json!({"context": {"slot": 12}, "value": 5000}),
        _ => Value::Null,
    })
    .await;
    let proxy = SolanaProxy::new(backend.url(), Duration::from_secs(2));

    assert_eq!(proxy.get_balance_lamports("Acct111").await.unwrap(), "5000");
    assert_eq!(
        backend.last(),
        json!({"jsonrpc": "2.0", "id": 1, "method": "getBalance", "params": ["Acct111"]})
    );
}

#[tokio::test]
async fn test_solana_options_sent_only_when_set() {
    let backend = common::start_mock_rpc(|_| json!([])).await;
    let proxy = SolanaProxy::new(backend.url(), Duration::from_secs(2));

    proxy
        .get_program_accounts("Prog111", &ProgramAccountsOptions::default())
        .await
        .unwrap();
    assert_eq!(backend.last()["params"], json!(["Prog111"]));

    let options = ProgramAccountsOptions {
        encoding: Some("base64".to_string()),
        with_context: true,
        filters: None,
    };
    proxy.get_program_accounts("Prog111", &options).await.unwrap();
    assert_eq!(
        backend.last()["params"],
        json!(["Prog111", {"encoding": "base64", "withContext": true}])
    );

    proxy
        .get_token_accounts_by_owner("Owner1", Some("Mint1"), None)
        .await
        .unwrap();
    assert_eq!(backend.last()["params"], json!(["Owner1", {"mint": "Mint1"}]));
}

#[tokio::test]
async fn test_solana_response_passed_through() {
    let backend = common::start_mock_rpc(|_| json!(4242)).await;
    let proxy = SolanaProxy::new(backend.url(), Duration::from_secs(2));

    let response = proxy.get_slot().await.unwrap();
    assert_eq!(response.get("result"), Some(&json!(4242)));
    assert_eq!(response.get("jsonrpc"), Some(&json!("2.0")));
}

#[tokio::test]
async fn test_solana_unreachable_endpoint() {
    let proxy = SolanaProxy::new("http://127.0.0.1:1", Duration::from_secs(2));
    let err = proxy.get_slot().await.unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(_) | BlockchainError::Timeout(_)));
}
