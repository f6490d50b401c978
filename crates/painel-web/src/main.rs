//! Painel Web Server
//!
//! Run with: cargo run -p painel-web

use anyhow::Context;
use painel_config::PainelConfig;
use painel_data::DataSnapshot;
use painel_web::{router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Painel Web Server...");

    let config = PainelConfig::load_or_default()?;
    let addr = config.socket_addr()?;

    // Everything is read before the listener opens
    let paths = config.paths.clone();
    let snapshot = tokio::task::spawn_blocking(move || DataSnapshot::load(&paths.data_dir, &paths.map_dir))
        .await
        .context("data loading task panicked")?;

    let state = AppState::new(snapshot, config.paths.frontend_dir)
        .context("failed to serialize dashboard pages")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
