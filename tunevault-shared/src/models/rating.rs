/// Song rating model
///
/// One rating per user per song, 1 to 5. Re-rating replaces the previous
/// value (upsert on the composite primary key).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE song_ratings (
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     song_id UUID NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
///     rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
///     rated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (user_id, song_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A user's rating of a song
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SongRating {
    pub user_id: Uuid,
    pub song_id: Uuid,

    /// 1 to 5
    pub rating: i32,

    /// When the rating was last set
    pub rated_at: DateTime<Utc>,
}

impl SongRating {
    /// Sets or replaces a user's rating for a song
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rating is outside 1..=5 (check constraint violation)
    /// - The song doesn't exist (foreign key violation)
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        song_id: Uuid,
        rating: i32,
    ) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, SongRating>(
            r#"
            INSERT INTO song_ratings (user_id, song_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, song_id)
            DO UPDATE SET rating = EXCLUDED.rating, rated_at = NOW()
            RETURNING user_id, song_id, rating, rated_at
            "#,
        )
        .bind(user_id)
        .bind(song_id)
        .bind(rating)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Gets a user's rating for a song, if they have rated it
    pub async fn find(
        pool: &PgPool,
        user_id: Uuid,
        song_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, SongRating>(
            "SELECT user_id, song_id, rating, rated_at FROM song_ratings WHERE user_id = $1 AND song_id = $2",
        )
        .bind(user_id)
        .bind(song_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }
}
