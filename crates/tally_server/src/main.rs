//! tallyd
//!
//! HTTP server for tally: named-value records, aggregate reports, and file
//! uploads.
//!
//! ```text
//! tallyd --bind 127.0.0.1:3000 --data tally.db --uploads uploads
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tally_core::EntryService;
use tally_server::{serve, ServerConfig};
use tally_store::{FileStore, MemoryStore, RecordStore, StoreConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// The tally record service.
#[derive(Parser)]
#[command(name = "tallyd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Path to the record data file
    #[arg(short, long, default_value = "tally.db")]
    data: PathBuf,

    /// Keep records in memory only (no data file)
    #[arg(long)]
    in_memory: bool,

    /// Directory for uploaded files
    #[arg(short, long, default_value = "uploads")]
    uploads: PathBuf,

    /// Allow records that share a name to coexist in the store
    #[arg(long)]
    allow_duplicate_names: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let store_config =
        StoreConfig::default().with_enforce_unique_names(!cli.allow_duplicate_names);

    let server_config = ServerConfig::new(cli.bind).with_uploads_dir(cli.uploads);

    let shutdown = CancellationToken::new();
    let shutdown_trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            shutdown_trigger.cancel();
        }
    });

    if cli.in_memory {
        tracing::info!("running with in-memory store; records will not be persisted");
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::with_config(store_config));
        let service = Arc::new(EntryService::new(store));
        serve(server_config, service, shutdown).await?;
    } else {
        let store = Arc::new(FileStore::open(&cli.data, store_config)?);
        let service = Arc::new(EntryService::new(
            Arc::clone(&store) as Arc<dyn RecordStore>
        ));
        serve(server_config, service, shutdown).await?;
        store.close()?;
    }

    Ok(())
}
