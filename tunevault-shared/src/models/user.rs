/// User model and database operations
///
/// Users register with a unique username and email; credentials are stored
/// as Argon2id hashes, never in plaintext. The last login timestamp is
/// touched on every successful login.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
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
/// let user = User::create(&pool, CreateUser {
///     username: "listener".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     email: "listener@example.com".to_string(),
/// }).await?;
///
/// let found = User::find_by_username(&pool, "listener").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Unique username, chosen at registration
    pub username: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    pub password_hash: String,

    /// Email address, unique across all users
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username (unique)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,

    /// Email address (unique)
    pub email: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username or email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, email, created_at, last_login_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// This is the login lookup; the caller verifies the password hash.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, created_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    ///
    /// # Returns
    ///
    /// True if user was found and updated, false otherwise
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Searches users by email substring, excluding the requesting user
    ///
    /// Match is case-insensitive. Used by the follow page to find people.
    pub async fn search_by_email(
        pool: &PgPool,
        requesting_user: Uuid,
        email: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", email);

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, created_at, last_login_at
            FROM users
            WHERE email ILIKE $1 AND id <> $2
            ORDER BY username ASC
            "#,
        )
        .bind(pattern)
        .bind(requesting_user)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Lists every user except the requesting one, ordered by username
    pub async fn list_others(
        pool: &PgPool,
        requesting_user: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, created_at, last_login_at
            FROM users
            WHERE id <> $1
            ORDER BY username ASC
            "#,
        )
        .bind(requesting_user)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Deletes a user by ID
    ///
    /// Cascades to the user's collections, follows, and ratings via foreign
    /// keys. Used by test cleanup.
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
