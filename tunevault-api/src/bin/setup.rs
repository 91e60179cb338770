//! # TuneVault Database Setup
//!
//! One-shot setup tool: creates the database if needed, applies the schema
//! migrations, and seeds a small sample catalog when the songs table is
//! empty. This is the only path that touches the schema; the API server
//! never migrates at runtime.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tunevault-api --bin tunevault-setup
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunevault_api::config::Config;
use tunevault_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tunevault_shared::models::song::{CreateSong, Song};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunevault_api=info,tunevault_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    seed_catalog(&pool).await?;

    close_pool(pool).await;
    tracing::info!("Database setup complete");

    Ok(())
}

/// Seeds a small sample catalog if the songs table is empty
async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::info!(songs = count, "Catalog already populated, skipping seed");
        return Ok(());
    }

    tracing::info!("Seeding sample catalog");

    let samples = [
        ("Giant Steps", "John Coltrane", "Giant Steps", "Jazz", 287),
        ("So What", "Miles Davis", "Kind of Blue", "Jazz", 562),
        ("Paranoid Android", "Radiohead", "OK Computer", "Rock", 387),
        ("Karma Police", "Radiohead", "OK Computer", "Rock", 264),
        ("Nude", "Radiohead", "In Rainbows", "Rock", 255),
        ("Redbone", "Childish Gambino", "Awaken, My Love!", "Funk", 327),
        ("Goosebumps", "Travis Scott", "Birds in the Trap", "Hip-Hop", 244),
        ("Holocene", "Bon Iver", "Bon Iver, Bon Iver", "Folk", 337),
        ("Skinny Love", "Bon Iver", "For Emma, Forever Ago", "Folk", 238),
        ("Clair de Lune", "Claude Debussy", "Suite bergamasque", "Classical", 300),
    ];

    for (title, artist, album, genre, duration) in samples {
        Song::create(
            pool,
            CreateSong {
                title: title.to_string(),
                artist: artist.to_string(),
                album: Some(album.to_string()),
                genre: Some(genre.to_string()),
                duration_seconds: Some(duration),
                release_date: None,
            },
        )
        .await?;
    }

    tracing::info!(songs = samples.len(), "Sample catalog seeded");
    Ok(())
}
