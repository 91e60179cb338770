//! # TuneVault API Server
//!
//! HTTP server for the TuneVault music-collection service: registration,
//! login, collection management, catalog search, and playback simulation,
//! backed by PostgreSQL.
//!
//! The server assumes the schema already exists (run `tunevault-setup`
//! first) and treats a failed initial database connection as fatal.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tunevault-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunevault_api::{
    app::{build_router, AppState},
    config::Config,
};
use tunevault_shared::db::pool::{create_pool, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunevault_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TuneVault API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool; an unreachable database aborts startup
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    // Build Axum application
    let state = AppState::new(pool, config.clone());
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
