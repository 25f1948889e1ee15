//! Listener loop with graceful shutdown.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::routes::{router, AppState};
use crate::upload::UploadStore;
use std::sync::Arc;
use tally_core::EntryService;
use tokio_util::sync::CancellationToken;

/// Binds the configured address and serves requests until `shutdown` is
/// cancelled.
///
/// The upload directory is created on startup. In-flight requests are
/// drained before this returns.
///
/// # Errors
///
/// Returns an error if the upload directory cannot be prepared, the bind
/// fails, or the accept loop faults.
pub async fn serve(
    config: ServerConfig,
    service: Arc<EntryService>,
    shutdown: CancellationToken,
) -> ServerResult<()> {
    let uploads = Arc::new(UploadStore::open(&config.uploads_dir)?);
    let state = AppState::new(service, uploads);
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
