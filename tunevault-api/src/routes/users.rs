/// User search and follow endpoints
///
/// The follow page: find other users (optionally by email substring) and
/// manage who you follow.
///
/// # Endpoints
///
/// - `GET    /v1/users?email=...` - List users to follow
/// - `POST   /v1/users/:id/follow` - Follow a user
/// - `DELETE /v1/users/:id/follow` - Unfollow a user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tunevault_shared::{
    auth::middleware::AuthContext,
    models::{follow::Follow, user::User},
};
use uuid::Uuid;

/// User listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    /// Email substring filter; absent lists everyone
    pub email: Option<String>,
}

/// One user on the follow page
///
/// The password hash never leaves the model layer here.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,

    /// Whether the requesting user already follows them
    pub following: bool,
}

/// User listing response
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
}

/// Lists users available to follow, excluding the requester
///
/// With `?email=`, filters by case-insensitive email substring; otherwise
/// lists everyone. Each entry carries whether the requester already follows
/// that user.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<Json<ListUsersResponse>> {
    let users = match params.email.as_deref() {
        Some(email) if !email.is_empty() => {
            User::search_by_email(&state.db, auth.user_id, email).await?
        }
        _ => User::list_others(&state.db, auth.user_id).await?,
    };

    let following: HashSet<Uuid> = Follow::list_following(&state.db, auth.user_id)
        .await?
        .into_iter()
        .collect();

    let users = users
        .into_iter()
        .map(|u| UserSummary {
            following: following.contains(&u.id),
            user_id: u.id,
            username: u.username,
            email: u.email,
        })
        .collect();

    Ok(Json(ListUsersResponse { users }))
}

/// Follows another user
///
/// # Errors
///
/// - `400 Bad Request`: Trying to follow yourself
/// - `404 Not Found`: User does not exist
/// - `409 Conflict`: Already following
pub async fn follow_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(followee_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Follow>)> {
    // Resolve the followee first so an unknown user is a 404, not a
    // foreign-key error
    User::find_by_id(&state.db, followee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let follow = Follow::create(&state.db, auth.user_id, followee_id).await?;

    tracing::info!(
        follower_id = %auth.user_id,
        followee_id = %followee_id,
        "User followed"
    );

    Ok((StatusCode::CREATED, Json(follow)))
}

/// Unfollows another user
///
/// # Errors
///
/// - `404 Not Found`: Not currently following this user
pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(followee_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let removed = Follow::delete(&state.db, auth.user_id, followee_id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "You are not following this user".to_string(),
        ));
    }

    tracing::info!(
        follower_id = %auth.user_id,
        followee_id = %followee_id,
        "User unfollowed"
    );

    Ok(StatusCode::NO_CONTENT)
}
