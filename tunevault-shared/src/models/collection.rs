/// Collection model and database operations
///
/// A collection is a user-owned named list of songs. It always belongs to
/// exactly one user; `UNIQUE (user_id, name)` means an owner cannot have two
/// collections with the same name, matching the original schema where the
/// pair was the primary key. Deleting a collection cascades to its
/// membership rows, never to the songs themselves.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE collections (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (user_id, name)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::models::collection::{Collection, CreateCollection};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let collection = Collection::create(&pool, CreateCollection {
///     user_id,
///     name: "Late Night".to_string(),
/// }).await?;
///
/// let mine = Collection::list_by_user(&pool, user_id).await?;
/// println!("{} collections", mine.len());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Collection model representing a user-owned playlist
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    /// Unique collection ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Collection name, unique per owner
    pub name: String,

    /// When the collection was created
    pub created_at: DateTime<Utc>,

    /// When the collection was last renamed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollection {
    /// Owning user
    pub user_id: Uuid,

    /// Collection name
    pub name: String,
}

/// Collection row plus membership aggregates, for listing pages
///
/// The original schema denormalized song count and total length onto the
/// collection row; here they are computed per query instead.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectionSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Number of songs in the collection
    pub song_count: i64,

    /// Combined duration of all member songs, in seconds
    pub total_duration_seconds: i64,
}

impl Collection {
    /// Creates a new, empty collection
    ///
    /// # Errors
    ///
    /// Returns an error if the owner already has a collection with this name
    /// (unique constraint violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateCollection) -> Result<Self, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(collection)
    }

    /// Finds a collection by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, user_id, name, created_at, updated_at
            FROM collections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(collection)
    }

    /// Lists a user's collections with song counts and total durations
    ///
    /// Ordered by name ascending, as the original listing page was.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CollectionSummary>, sqlx::Error> {
        let collections = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT c.id, c.user_id, c.name, c.created_at, c.updated_at,
                   COUNT(cs.song_id) AS song_count,
                   COALESCE(SUM(s.duration_seconds), 0) AS total_duration_seconds
            FROM collections c
            LEFT JOIN collection_songs cs ON cs.collection_id = c.id
            LEFT JOIN songs s ON s.id = cs.song_id
            WHERE c.user_id = $1
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(collections)
    }

    /// Renames a collection
    ///
    /// Membership and identifier are untouched; only the name and
    /// `updated_at` change.
    ///
    /// # Returns
    ///
    /// The updated collection, or None if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the owner already has a collection with the new
    /// name (unique constraint violation).
    pub async fn rename(
        pool: &PgPool,
        id: Uuid,
        new_name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            UPDATE collections
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new_name)
        .fetch_optional(pool)
        .await?;

        Ok(collection)
    }

    /// Deletes a collection
    ///
    /// Membership rows go with it via the foreign key cascade; songs stay in
    /// the catalog.
    ///
    /// # Returns
    ///
    /// True if the collection was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
