//! Solana JSON-RPC proxy.
//!
//! Stateless: every operation builds a JSON-RPC 2.0 envelope and performs
//! one HTTP POST against the configured endpoint. Optional parameters are
//! folded into a single options object that is only appended to `params`
//! when at least one of them is set.

use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Weakly-typed JSON-RPC response body.
pub type RpcResponse = Map<String, Value>;

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: &'static str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }

    pub fn get_account_info(account: &str) -> Self {
        Self::new("getAccountInfo", vec![Value::from(account)])
    }

    pub fn get_balance(account: &str) -> Self {
        Self::new("getBalance", vec![Value::from(account)])
    }

    pub fn get_slot() -> Self {
        Self::new("getSlot", Vec::new())
    }

    pub fn get_program_accounts(pubkey: &str, options: &ProgramAccountsOptions) -> Self {
        let params = RpcOptions::default()
            .text("encoding", options.encoding.as_deref())
            .flag("withContext", options.with_context)
            .value("filters", options.filters.clone())
            .append_to(vec![Value::from(pubkey)]);
        Self::new("getProgramAccounts", params)
    }

    pub fn get_token_account_balance(pubkey: &str) -> Self {
        Self::new("getTokenAccountBalance", vec![Value::from(pubkey)])
    }

    pub fn get_multiple_accounts(pubkeys: &[String]) -> Self {
        Self::new("getMultipleAccounts", vec![Value::from(pubkeys.to_vec())])
    }

    pub fn get_token_accounts_by_owner(
        pubkey: &str,
        mint: Option<&str>,
        program_id: Option<&str>,
    ) -> Self {
        let params = RpcOptions::default()
            .text("mint", mint)
            .text("programId", program_id)
            .append_to(vec![Value::from(pubkey)]);
        Self::new("getTokenAccountsByOwner", params)
    }

    pub fn get_transaction(signature: &str, encoding: Option<&str>) -> Self {
        let params = RpcOptions::default()
            .text("encoding", encoding)
            .append_to(vec![Value::from(signature)]);
        Self::new("getTransaction", params)
    }
}

/// Optional fields of `getProgramAccounts`.
#[derive(Debug, Clone, Default)]
pub struct ProgramAccountsOptions {
    pub encoding: Option<String>,
    pub with_context: bool,
    pub filters: Option<Value>,
}

/// Collects populated optional parameters into one JSON object.
#[derive(Default)]
struct RpcOptions(Map<String, Value>);

impl RpcOptions {
    fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn flag(mut self, key: &str, value: bool) -> Self {
        if value {
            self.0.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    fn value(mut self, key: &str, value: Option<Value>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_null()) {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    fn append_to(self, mut params: Vec<Value>) -> Vec<Value> {
        if !self.0.is_empty() {
            params.push(Value::Object(self.0));
        }
        params
    }
}

/// Proxy for Solana-compatible JSON-RPC nodes.
#[derive(Debug, Clone)]
pub struct SolanaProxy {
    client: reqwest::Client,
    rpc_url: String,
    timeout_duration: Duration,
}

impl SolanaProxy {
    pub fn new(rpc_url: impl Into<String>, rpc_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            timeout_duration: rpc_timeout,
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub async fn get_account_info(&self, account: &str) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_account_info(account)).await
    }

    pub async fn get_balance(&self, account: &str) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_balance(account)).await
    }

    pub async fn get_slot(&self) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_slot()).await
    }

    pub async fn get_program_accounts(
        &self,
        pubkey: &str,
        options: &ProgramAccountsOptions,
    ) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_program_accounts(pubkey, options))
            .await
    }

    pub async fn get_token_account_balance(&self, pubkey: &str) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_token_account_balance(pubkey))
            .await
    }

    pub async fn get_multiple_accounts(&self, pubkeys: &[String]) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_multiple_accounts(pubkeys))
            .await
    }

    pub async fn get_token_accounts_by_owner(
        &self,
        pubkey: &str,
        mint: Option<&str>,
        program_id: Option<&str>,
    ) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_token_accounts_by_owner(pubkey, mint, program_id))
            .await
    }

    pub async fn get_transaction(
        &self,
        signature: &str,
        encoding: Option<&str>,
    ) -> BlockchainResult<RpcResponse> {
        self.do_rpc_call(&RpcRequest::get_transaction(signature, encoding))
            .await
    }

    /// Account balance in lamports as a decimal string.
    pub async fn get_balance_lamports(&self, account: &str) -> BlockchainResult<String> {
        let response = self.get_balance(account).await?;

        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(BlockchainError::Rpc(message));
        }

        response
            .get("result")
            .and_then(|result| result.get("value"))
            .and_then(Value::as_u64)
            .map(|lamports| lamports.to_string())
            .ok_or_else(|| {
                BlockchainError::Decode("getBalance response has no result.value".to_string())
            })
    }

    /// POST one JSON-RPC payload and decode the body. No retries.
    pub async fn do_rpc_call<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> BlockchainResult<RpcResponse> {
        let exchange = async {
            self.client
                .post(&self.rpc_url)
                .json(payload)
                .send()
                .await?
                .error_for_status()?
                .json::<RpcResponse>()
                .await
        };

        match timeout(self.timeout_duration, exchange).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(e)) if e.is_decode() => Err(BlockchainError::Decode(e.to_string())),
            Ok(Err(e)) => {
                tracing::warn!(rpc_url = %self.rpc_url, error = %e, "Solana RPC call failed");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(request: &RpcRequest) -> Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn test_envelope_shape() {
        assert_eq!(
            to_json(&RpcRequest::get_slot()),
            json!({"jsonrpc": "2.0", "id": 1, "method": "getSlot", "params": []})
        );
    }

    #[test]
    fn test_program_accounts_without_options() {
        let request =
            RpcRequest::get_program_accounts("Prog111", &ProgramAccountsOptions::default());
        assert_eq!(request.params, vec![json!("Prog111")]);
    }

    #[test]
    fn test_program_accounts_with_encoding() {
        let options = ProgramAccountsOptions {
            encoding: Some("base64".to_string()),
            ..Default::default()
        };
        let request = RpcRequest::get_program_accounts("Prog111", &options);
        assert_eq!(request.params, vec![json!("Prog111"), json!({"encoding": "base64"})]);
    }

    #[test]
    fn test_program_accounts_all_options() {
        let options = ProgramAccountsOptions {
            encoding: Some("jsonParsed".to_string()),
            with_context: true,
            filters: Some(json!([{"dataSize": 165}])),
        };
        let request = RpcRequest::get_program_accounts("Prog111", &options);
        assert_eq!(
            request.params[1],
            json!({"encoding": "jsonParsed", "withContext": true, "filters": [{"dataSize": 165}]})
        );
    }

    #[test]
    fn test_empty_strings_count_as_unset() {
        let request = RpcRequest::get_token_accounts_by_owner("Owner1", Some(""), None);
        assert_eq!(request.params.len(), 1);

        let request = RpcRequest::get_transaction("sig", Some(""));
        assert_eq!(request.params, vec![json!("sig")]);
    }

    #[test]
    fn test_token_accounts_by_owner_with_mint() {
        let request = RpcRequest::get_token_accounts_by_owner("Owner1", Some("Mint1"), None);
        assert_eq!(request.params, vec![json!("Owner1"), json!({"mint": "Mint1"})]);
    }

    #[test]
    fn test_multiple_accounts_nests_keys() {
        let keys = vec!["A".to_string(), "B".to_string()];
        let request = RpcRequest::get_multiple_accounts(&keys);
        assert_eq!(request.params, vec![json!(["A", "B"])]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_error() {
        let proxy = SolanaProxy::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = proxy.get_slot().await.unwrap_err();
        assert!(matches!(
            err,
            BlockchainError::Rpc(_) | BlockchainError::Timeout(_)
        ));
    }
}
