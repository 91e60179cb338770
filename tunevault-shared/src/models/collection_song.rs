/// Collection membership model
///
/// Many-to-many association between collections and songs. A song can be in
/// any number of collections, once each; adding a duplicate violates the
/// composite primary key.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE collection_songs (
///     collection_id UUID NOT NULL REFERENCES collections(id) ON DELETE CASCADE,
///     song_id UUID NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
///     added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (collection_id, song_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::models::collection_song::CollectionSong;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, collection_id: Uuid, song_id: Uuid)
/// #     -> Result<(), sqlx::Error> {
/// CollectionSong::add(&pool, collection_id, song_id).await?;
///
/// let songs = CollectionSong::list_songs(&pool, collection_id).await?;
/// println!("{} songs in collection", songs.len());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::song::Song;

/// Membership row linking a song into a collection
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectionSong {
    /// Collection the song belongs to
    pub collection_id: Uuid,

    /// The member song
    pub song_id: Uuid,

    /// When the song was added
    pub added_at: DateTime<Utc>,
}

impl CollectionSong {
    /// Adds a song to a collection
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The song is already in the collection (primary key violation)
    /// - The collection or song doesn't exist (foreign key violation)
    pub async fn add(
        pool: &PgPool,
        collection_id: Uuid,
        song_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, CollectionSong>(
            r#"
            INSERT INTO collection_songs (collection_id, song_id)
            VALUES ($1, $2)
            RETURNING collection_id, song_id, added_at
            "#,
        )
        .bind(collection_id)
        .bind(song_id)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Removes a song from a collection
    ///
    /// # Returns
    ///
    /// True if a membership row was removed, false if the song wasn't in the
    /// collection
    pub async fn remove(
        pool: &PgPool,
        collection_id: Uuid,
        song_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM collection_songs WHERE collection_id = $1 AND song_id = $2",
        )
        .bind(collection_id)
        .bind(song_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the songs in a collection, oldest addition first
    ///
    /// An empty collection (or a deleted one) yields an empty vector.
    pub async fn list_songs(pool: &PgPool, collection_id: Uuid) -> Result<Vec<Song>, sqlx::Error> {
        let songs = sqlx::query_as::<_, Song>(
            r#"
            SELECT s.id, s.title, s.artist, s.album, s.genre, s.duration_seconds,
                   s.release_date, s.play_count, s.created_at
            FROM songs s
            JOIN collection_songs cs ON cs.song_id = s.id
            WHERE cs.collection_id = $1
            ORDER BY cs.added_at ASC, s.title ASC
            "#,
        )
        .bind(collection_id)
        .fetch_all(pool)
        .await?;

        Ok(songs)
    }
}
