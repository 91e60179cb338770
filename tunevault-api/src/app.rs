/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tunevault_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tunevault_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tunevault_shared::auth::{
    middleware::{AuthContext, AuthError},
    session,
};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session secret for token operations
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// ├── /v1/                             # API v1 (versioned)
/// │   ├── /auth/
/// │   │   ├── POST /register           # Public
/// │   │   ├── POST /login              # Public
/// │   │   └── POST /logout             # Authenticated
/// │   ├── /collections                 # Authenticated from here down
/// │   │   ├── GET    /                 # List own collections
/// │   │   ├── POST   /                 # Create collection
/// │   │   ├── GET    /:id              # Collection details + songs
/// │   │   ├── PUT    /:id              # Rename
/// │   │   ├── DELETE /:id              # Delete
/// │   │   ├── POST   /:id/songs        # Add song
/// │   │   ├── DELETE /:id/songs/:song_id
/// │   │   └── POST   /:id/play         # Play every member song
/// │   ├── /songs/
/// │   │   ├── GET /search              # field/q/sort/order query params
/// │   │   ├── POST /:id/play
/// │   │   └── PUT  /:id/rating
/// │   └── /users/
/// │       ├── GET    /                 # List/search users to follow
/// │       ├── POST   /:id/follow
/// │       └── DELETE /:id/follow
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let public_auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Everything else requires a valid session token
    let session_routes = Router::new()
        .route("/auth/logout", post(routes::auth::logout))
        .route(
            "/collections",
            get(routes::collections::list_collections)
                .post(routes::collections::create_collection),
        )
        .route(
            "/collections/:id",
            get(routes::collections::get_collection)
                .put(routes::collections::rename_collection)
                .delete(routes::collections::delete_collection),
        )
        .route(
            "/collections/:id/songs",
            post(routes::collections::add_song),
        )
        .route(
            "/collections/:id/songs/:song_id",
            axum::routing::delete(routes::collections::remove_song),
        )
        .route(
            "/collections/:id/play",
            post(routes::collections::play_collection),
        )
        .route("/songs/search", get(routes::songs::search_songs))
        .route("/songs/:id/play", post(routes::songs::play_song))
        .route("/songs/:id/rating", put(routes::songs::rate_song))
        .route("/users", get(routes::users::list_users))
        .route(
            "/users/:id/follow",
            post(routes::users::follow_user).delete(routes::users::unfollow_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", public_auth_routes)
        .merge(session_routes);

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Extracts and validates the session token from the Authorization header,
/// then injects AuthContext into request extensions.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    // Validate token
    let claims = session::validate_token(token, state.session_secret())?;

    // Insert auth context into request extensions
    req.extensions_mut()
        .insert(AuthContext::from_session(claims.sub));

    Ok(next.run(req).await)
}
