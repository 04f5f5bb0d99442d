//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use local_fusion::blockchain::{ChainConfig, ChainProxies, EvmClientRegistry, SolanaProxy};
use local_fusion::config::FusionConfig;
use local_fusion::http::{AppState, FusionServer};
use local_fusion::lifecycle::Shutdown;

type Responder = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A JSON-RPC backend that records every payload it receives.
#[derive(Clone)]
pub struct MockRpc {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockRpc {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    pub fn last(&self) -> Value {
        self.received().last().cloned().expect("no request received")
    }
}

#[derive(Clone)]
struct MockState {
    received: Arc<Mutex<Vec<Value>>>,
    respond: Responder,
}

/// Start a mock JSON-RPC backend on an ephemeral port.
///
/// `respond` maps the incoming request to the `result` field; the envelope
/// echoes the request id.
pub async fn start_mock_rpc<F>(respond: F) -> MockRpc
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        received: received.clone(),
        respond: Arc::new(respond),
    };

    let app = Router::new().route("/", post(handle_rpc)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockRpc { addr, received }
}

async fn handle_rpc(State(state): State<MockState>, Json(request): Json<Value>) -> Json<Value> {
    state.received.lock().unwrap().push(request.clone());
    let result = (state.respond)(&request);
    Json(json!({
        "jsonrpc": "2.0",
        "id": request.get("id").cloned().unwrap_or(Value::Null),
        "result": result,
    }))
}

/// Build handler state with EVM chains dialed from `evm_chains`.
pub async fn app_state(evm_chains: &[ChainConfig], mock_mode: bool, solana_url: &str) -> AppState {
    let evm = EvmClientRegistry::connect(evm_chains, mock_mode, Duration::from_secs(2)).await;
    let solana = SolanaProxy::new(solana_url, Duration::from_secs(2));
    AppState::new(ChainProxies::new(Arc::new(evm), Arc::new(solana)))
}

/// Start the fusion server on an ephemeral port.
pub async fn start_fusion(state: AppState) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let server = FusionServer::new(&FusionConfig::default(), state);
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
