use std::sync::Arc;

use billcraft_server::{config::ServerConfig, router, state::AppState};
use billcraft_store::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::load()?;
    tracing::info!("Configuration loaded");

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store, config.clone());
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("billcraft listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/invoices (JSON create/update)");
    tracing::info!("  - POST /api/invoices/multipart (create/update with logo)");
    tracing::info!("  - GET  /api/invoices/:id");
    tracing::info!("  - GET  /api/invoices/:id/pdf (download)");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,billcraft_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
