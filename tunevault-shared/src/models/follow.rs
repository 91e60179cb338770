/// Follow model
///
/// Directed user-to-user follow relationships. The schema forbids
/// self-follows (`CHECK (follower_id <> followee_id)`) and duplicate
/// follows (composite primary key); both surface as database errors rather
/// than application checks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE follows (
///     follower_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     followee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (follower_id, followee_id),
///     CHECK (follower_id <> followee_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Follow row: `follower_id` follows `followee_id`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Starts following another user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Already following (primary key violation)
    /// - Following yourself (check constraint violation)
    /// - Either user doesn't exist (foreign key violation)
    pub async fn create(
        pool: &PgPool,
        follower_id: Uuid,
        followee_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let follow = sqlx::query_as::<_, Follow>(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            RETURNING follower_id, followee_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(pool)
        .await?;

        Ok(follow)
    }

    /// Stops following another user
    ///
    /// # Returns
    ///
    /// True if a follow was removed, false if there was none
    pub async fn delete(
        pool: &PgPool,
        follower_id: Uuid,
        followee_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower_id)
                .bind(followee_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the user IDs this user follows
    pub async fn list_following(
        pool: &PgPool,
        follower_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY created_at ASC",
        )
        .bind(follower_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
