/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations applied on first connect)
/// - Test user creation with a real password hash
/// - Session token generation
/// - Request helpers
///
/// Tests require a running PostgreSQL database; set `DATABASE_URL` (or the
/// `DATABASE_*` pieces) and `SESSION_SECRET` before running.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use sqlx::PgPool;
use tower::Service as _;
use tunevault_api::app::{build_router, AppState};
use tunevault_api::config::Config;
use tunevault_shared::auth::password::hash_password;
use tunevault_shared::auth::session::{create_token, Claims};
use tunevault_shared::models::song::{CreateSong, Song};
use tunevault_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Password used for every test user
pub const TEST_PASSWORD: &str = "integration-test-password";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh test user
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Create test user with a unique name and a real hash so login works
        let suffix = Uuid::new_v4();
        let user = User::create(
            &db,
            CreateUser {
                username: format!("test-user-{}", suffix),
                password_hash: hash_password(TEST_PASSWORD)?,
                email: format!("test-{}@example.com", suffix),
            },
        )
        .await?;

        // Generate session token
        let claims = Claims::new(user.id);
        let token = create_token(&claims, &config.session.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Creates a second user with their own session token
    pub async fn create_other_user(&self) -> anyhow::Result<(User, String)> {
        let suffix = Uuid::new_v4();
        let user = User::create(
            &self.db,
            CreateUser {
                username: format!("other-user-{}", suffix),
                password_hash: hash_password(TEST_PASSWORD)?,
                email: format!("other-{}@example.com", suffix),
            },
        )
        .await?;

        let token = create_token(&Claims::new(user.id), &self.config.session.secret)?;
        Ok((user, token))
    }

    /// Sends a request with the context's session token attached
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        self.send_as(method, uri, Some(&self.token), body).await
    }

    /// Sends a request with an explicit (or no) session token
    pub async fn send_as(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().call(request).await.unwrap()
    }

    /// Cleans up test data
    ///
    /// Deleting the user cascades to their collections, memberships,
    /// follows, and ratings. Catalog songs created by a test are removed
    /// with [`cleanup_songs`].
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Helper to add a uniquely-named song to the catalog
pub async fn create_test_song(ctx: &TestContext, title: &str, artist: &str) -> anyhow::Result<Song> {
    let song = Song::create(
        &ctx.db,
        CreateSong {
            title: title.to_string(),
            artist: artist.to_string(),
            album: Some("Test Album".to_string()),
            genre: Some("Test Genre".to_string()),
            duration_seconds: Some(180),
            release_date: None,
        },
    )
    .await?;

    Ok(song)
}

/// Removes catalog songs a test created
pub async fn cleanup_songs(ctx: &TestContext, song_ids: &[Uuid]) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM songs WHERE id = ANY($1)")
        .bind(song_ids)
        .execute(&ctx.db)
        .await?;
    Ok(())
}

/// Parses a JSON response body, panicking with the body text on failure
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Invalid JSON body ({}): {}", e, String::from_utf8_lossy(&bytes)))
}

/// Asserts a response status, printing the body when it differs
pub async fn assert_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    if status != expected {
        panic!(
            "Expected {}, got {}: {}",
            expected,
            status,
            String::from_utf8_lossy(&bytes)
        );
    }

    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    }
}
