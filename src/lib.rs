pub mod config;
pub mod error;
pub mod esv;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod server;
pub mod state;

pub use config::{CliArgs, ServerConfig};
pub use error::RelayError;
pub use logging::{LoggingConfig, init_logging};
pub use model::{ErrorBody, PassageResult};
pub use server::build_router;

use anyhow::Result;
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone()));
    let router = server::build_router(state);

    let listener = TcpListener::bind(config.bind_address).await?;
    let actual_addr = listener.local_addr()?;
    info!(bind = %actual_addr, upstream = %config.upstream_url, "ESV relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received SIGINT (Ctrl+C), shutting down");
        },
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        },
    }
}
