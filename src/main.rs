//! Local Fusion (v1)
//!
//! A local stand-in for the hosted storage and chain-RPC services, built
//! with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 LOCAL FUSION                   │
//!                        │                                                │
//!   Client Request       │  ┌─────────┐    ┌────────────────────────┐     │
//!   ─────────────────────┼─▶│  http   │───▶│ storage                │     │
//!                        │  │ server  │    │  ephemeral / persistent│     │
//!                        │  └────┬────┘    │  kv + queues           │     │
//!                        │       │         └────────────────────────┘     │
//!                        │       │         ┌────────────────────────┐     │
//!                        │       └────────▶│ blockchain             │─────┼──▶ EVM RPC
//!                        │                 │  evm registry (mock?)  │     │
//!                        │                 │  solana proxy          │─────┼──▶ Solana RPC
//!                        │                 └────────────────────────┘     │
//!                        │                                                │
//!                        │  config · observability · lifecycle            │
//!                        └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use local_fusion::blockchain::loader::load_chain_configs;
use local_fusion::blockchain::{ChainProxies, EvmClientRegistry, SolanaProxy};
use local_fusion::config::load_config;
use local_fusion::http::{AppState, FusionServer};
use local_fusion::lifecycle::{signals, Shutdown};
use local_fusion::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "local-fusion")]
#[command(about = "Local storage and chain-RPC emulation server", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("local-fusion v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mock_mode = config.evm.mock_mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let chain_configs = load_chain_configs(&config.evm)?;
    let evm = EvmClientRegistry::connect(
        &chain_configs,
        config.evm.mock_mode,
        Duration::from_secs(config.evm.rpc_timeout_secs),
    )
    .await;
    tracing::info!(chains = ?evm.chains(), "EVM registry ready");

    let solana = SolanaProxy::new(
        config.solana.rpc_url.clone(),
        Duration::from_secs(config.solana.rpc_timeout_secs),
    );
    tracing::info!(rpc_url = %solana.rpc_url(), "Solana proxy ready");
    let state = AppState::new(ChainProxies::new(Arc::new(evm), Arc::new(solana)));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    FusionServer::new(&config, state).run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
