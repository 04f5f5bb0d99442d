//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the local RPC surface
//! - Wire up middleware (request id, tracing, timeout, body limit)
//! - Hold the shared state handed to every handler
//! - Serve until the shutdown signal fires, then drain

use axum::{
    extract::State,
    http::HeaderName,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::blockchain::ChainProxies;
use crate::config::FusionConfig;
use crate::http::error::ApiError;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::storage::StoreKind;
use crate::http::{chain, storage};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::storage::{EphemeralStorage, PersistentStorage, StorageFacade};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ephemeral: Arc<EphemeralStorage>,
    pub persistent: Arc<PersistentStorage>,
    pub chains: ChainProxies,
}

impl AppState {
    /// Fresh, empty storage facades around the given chain proxies.
    pub fn new(chains: ChainProxies) -> Self {
        Self {
            ephemeral: Arc::new(EphemeralStorage::new()),
            persistent: Arc::new(PersistentStorage::new()),
            chains,
        }
    }

    pub fn storage(&self, kind: StoreKind) -> &dyn StorageFacade {
        match kind {
            StoreKind::Ephemeral => self.ephemeral.as_ref(),
            StoreKind::Persistent => self.persistent.as_ref(),
        }
    }
}

/// HTTP server for the local fusion surface.
pub struct FusionServer {
    router: Router,
}

impl FusionServer {
    pub fn new(config: &FusionConfig, state: AppState) -> Self {
        Self {
            router: build_router(config, state),
        }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &FusionConfig, state: AppState) -> Router {
    let request_id = HeaderName::from_static(X_REQUEST_ID);

    Router::new()
        .route("/health", get(health))
        .route("/v1/storage/{store}/get", post(storage::get_value))
        .route("/v1/storage/{store}/put", post(storage::put_value))
        .route("/v1/storage/{store}/delete", post(storage::delete_value))
        .route("/v1/storage/ephemeral/queue/enqueue", post(storage::enqueue))
        .route("/v1/storage/ephemeral/queue/dequeue", post(storage::dequeue))
        .route("/v1/storage/ephemeral/queue/peek", post(storage::peek))
        .route("/v1/evm/balance", post(chain::evm_balance))
        .route("/v1/evm/call", post(chain::evm_call))
        .route("/v1/chain/balance", post(chain::chain_balance))
        .route("/v1/solana/account-info", post(chain::solana_account_info))
        .route("/v1/solana/balance", post(chain::solana_balance))
        .route("/v1/solana/slot", post(chain::solana_slot))
        .route("/v1/solana/program-accounts", post(chain::solana_program_accounts))
        .route("/v1/solana/token-account-balance", post(chain::solana_token_account_balance))
        .route("/v1/solana/multiple-accounts", post(chain::solana_multiple_accounts))
        .route("/v1/solana/token-accounts-by-owner", post(chain::solana_token_accounts_by_owner))
        .route("/v1/solana/transaction", post(chain::solana_transaction))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, UuidRequestId))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    evm_clients: usize,
    mock_mode: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        evm_clients: state.chains.evm().len(),
        mock_mode: state.chains.evm().mock_mode(),
    })
}

/// Record the outcome of a fallible operation and pass the result through.
pub(crate) fn observe<T>(
    operation: &'static str,
    start: Instant,
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_rpc(operation, outcome, start);
    result
}
