/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Logout
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/login` - Login and get a session token
/// - `POST /v1/auth/logout` - End the session

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use tunevault_shared::{
    auth::{middleware::AuthContext, password, session},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user ID
    pub user_id: Uuid,

    /// Registered username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: Uuid,

    /// Username
    pub username: String,

    /// Session token (24h), sent back as `Authorization: Bearer <token>`
    pub token: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "listener",
///   "password": "hunter2hunter2",
///   "email": "listener@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username or email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Duplicate usernames/emails surface as unique-constraint conflicts
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
            email: req.email,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            username: user.username,
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns a session token. Also touches the
/// user's last-login timestamp.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "listener",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Find user by username; the same error for an unknown user and a wrong
    // password, so the response doesn't reveal which usernames exist
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    // Update last login
    User::update_last_login(&state.db, user.id).await?;

    // Issue session token
    let claims = session::Claims::new(user.id);
    let token = session::create_token(&claims, state.session_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

/// Logout endpoint
///
/// Session tokens are stateless, so there is nothing to revoke server-side;
/// the endpoint acknowledges the logout and the client discards its token,
/// returning the user to the logged-out state.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/logout
/// Authorization: Bearer <token>
/// ```
pub async fn logout(Extension(auth): Extension<AuthContext>) -> ApiResult<Json<LogoutResponse>> {
    tracing::info!(user_id = %auth.user_id, "User logged out");

    Ok(Json(LogoutResponse {
        status: "logged_out".to_string(),
    }))
}
