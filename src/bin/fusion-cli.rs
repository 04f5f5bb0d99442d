use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "fusion-cli")]
#[command(about = "Command-line client for a running local-fusion server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4000")]
    url: String,

    /// Target the persistent store instead of the ephemeral one
    #[arg(long, global = true)]
    persistent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server status
    Health,
    /// Read a key
    Get {
        #[arg(long, default_value = "STORAGE_TYPE_GLOBAL")]
        storage_type: String,
        key: String,
    },
    /// Write a key, optionally with an explicit version
    Put {
        #[arg(long, default_value = "STORAGE_TYPE_GLOBAL")]
        storage_type: String,
        key: String,
        value: String,
        #[arg(long)]
        version: Option<u64>,
    },
    /// Delete a key
    Delete {
        #[arg(long, default_value = "STORAGE_TYPE_GLOBAL")]
        storage_type: String,
        key: String,
    },
    /// Push a value onto an ephemeral queue
    Enqueue {
        #[arg(long, default_value = "STORAGE_TYPE_GLOBAL")]
        storage_type: String,
        name: String,
        value: String,
    },
    /// Pop the head of an ephemeral queue
    Dequeue {
        #[arg(long, default_value = "STORAGE_TYPE_GLOBAL")]
        storage_type: String,
        name: String,
    },
    /// Native balance of an account on any supported chain
    Balance {
        /// Chain name or BLOCKCHAIN_TYPE_* identifier
        chain: String,
        account: String,
    },
    /// Current Solana slot
    Slot,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let store = if cli.persistent { "persistent" } else { "ephemeral" };

    let (path, body) = match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            return print_response(res).await;
        }
        Commands::Get { storage_type, key } => (
            format!("/v1/storage/{}/get", store),
            json!({ "storageType": storage_type, "key": key }),
        ),
        Commands::Put {
            storage_type,
            key,
            value,
            version,
        } => (
            format!("/v1/storage/{}/put", store),
            json!({ "storageType": storage_type, "key": key, "value": value, "version": version }),
        ),
        Commands::Delete { storage_type, key } => (
            format!("/v1/storage/{}/delete", store),
            json!({ "storageType": storage_type, "key": key }),
        ),
        Commands::Enqueue {
            storage_type,
            name,
            value,
        } => (
            "/v1/storage/ephemeral/queue/enqueue".to_string(),
            json!({ "storageType": storage_type, "name": name, "value": value }),
        ),
        Commands::Dequeue { storage_type, name } => (
            "/v1/storage/ephemeral/queue/dequeue".to_string(),
            json!({ "storageType": storage_type, "name": name }),
        ),
        Commands::Balance { chain, account } => (
            "/v1/chain/balance".to_string(),
            json!({ "blockchainType": chain, "account": account }),
        ),
        Commands::Slot => ("/v1/solana/slot".to_string(), json!({})),
    };

    let res = client
        .post(format!("{}{}", cli.url, path))
        .json(&body)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
