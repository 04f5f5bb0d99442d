//! EVM, Solana and chain-agnostic handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::blockchain::solana::RpcResponse;
use crate::blockchain::{BlockchainType, ProgramAccountsOptions};
use crate::http::error::ApiError;
use crate::http::server::{observe, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmBalanceRequest {
    pub blockchain_type: BlockchainType,
    pub address: String,
    #[serde(default)]
    pub block_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmCallRequest {
    pub blockchain_type: BlockchainType,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CallResponse {
    pub result: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBalanceRequest {
    pub blockchain_type: BlockchainType,
    pub account: String,
}

#[derive(Debug, Deserialize)]
pub struct PubkeyRequest {
    pub pubkey: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAccountsRequest {
    pub pubkey: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub with_context: bool,
    #[serde(default)]
    pub filters: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct MultipleAccountsRequest {
    pub pubkeys: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountsByOwnerRequest {
    pub pubkey: String,
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub program_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub signature: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

pub async fn evm_balance(
    State(state): State<AppState>,
    Json(request): Json<EvmBalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .evm()
        .get_account_balance(
            request.blockchain_type,
            &request.address,
            request.block_number.as_deref(),
        )
        .await
        .map_err(ApiError::from);

    observe("evm_balance", start, result).map(|balance| Json(BalanceResponse { balance }))
}

pub async fn evm_call(
    State(state): State<AppState>,
    Json(request): Json<EvmCallRequest>,
) -> Result<Json<CallResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .evm()
        .make_call(
            request.blockchain_type,
            &request.from,
            &request.to,
            request.data.as_deref(),
            request.block_number.as_deref(),
        )
        .await
        .map_err(ApiError::from);

    observe("evm_call", start, result).map(|result| Json(CallResponse { result }))
}

pub async fn chain_balance(
    State(state): State<AppState>,
    Json(request): Json<ChainBalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .resolve(request.blockchain_type)
        .native_balance(request.blockchain_type, &request.account)
        .await
        .map_err(ApiError::from);

    observe("chain_balance", start, result).map(|balance| Json(BalanceResponse { balance }))
}

pub async fn solana_account_info(
    State(state): State<AppState>,
    Json(request): Json<PubkeyRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state.chains.solana().get_account_info(&request.pubkey).await;
    solana_reply("solana_account_info", start, result)
}

pub async fn solana_balance(
    State(state): State<AppState>,
    Json(request): Json<PubkeyRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state.chains.solana().get_balance(&request.pubkey).await;
    solana_reply("solana_balance", start, result)
}

pub async fn solana_slot(State(state): State<AppState>) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state.chains.solana().get_slot().await;
    solana_reply("solana_slot", start, result)
}

pub async fn solana_program_accounts(
    State(state): State<AppState>,
    Json(request): Json<ProgramAccountsRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let options = ProgramAccountsOptions {
        encoding: request.encoding,
        with_context: request.with_context,
        filters: request.filters,
    };
    let result = state
        .chains
        .solana()
        .get_program_accounts(&request.pubkey, &options)
        .await;
    solana_reply("solana_program_accounts", start, result)
}

pub async fn solana_token_account_balance(
    State(state): State<AppState>,
    Json(request): Json<PubkeyRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .solana()
        .get_token_account_balance(&request.pubkey)
        .await;
    solana_reply("solana_token_account_balance", start, result)
}

pub async fn solana_multiple_accounts(
    State(state): State<AppState>,
    Json(request): Json<MultipleAccountsRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .solana()
        .get_multiple_accounts(&request.pubkeys)
        .await;
    solana_reply("solana_multiple_accounts", start, result)
}

pub async fn solana_token_accounts_by_owner(
    State(state): State<AppState>,
    Json(request): Json<TokenAccountsByOwnerRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .solana()
        .get_token_accounts_by_owner(
            &request.pubkey,
            request.mint.as_deref(),
            request.program_id.as_deref(),
        )
        .await;
    solana_reply("solana_token_accounts_by_owner", start, result)
}

pub async fn solana_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<RpcResponse>, ApiError> {
    let start = Instant::now();
    let result = state
        .chains
        .solana()
        .get_transaction(&request.signature, request.encoding.as_deref())
        .await;
    solana_reply("solana_transaction", start, result)
}

fn solana_reply(
    operation: &'static str,
    start: Instant,
    result: crate::blockchain::BlockchainResult<RpcResponse>,
) -> Result<Json<RpcResponse>, ApiError> {
    observe(operation, start, result.map_err(ApiError::from)).map(Json)
}
