/// Database models for TuneVault
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `song`: The song catalog with play counts and search
/// - `collection`: User-owned playlists
/// - `collection_song`: Collection membership (many-to-many)
/// - `follow`: User-to-user follow relationships
/// - `rating`: Per-user song ratings
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::models::user::{CreateUser, User};
/// use tunevault_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "listener".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     email: "listener@example.com".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod collection;
pub mod collection_song;
pub mod follow;
pub mod rating;
pub mod song;
pub mod user;
