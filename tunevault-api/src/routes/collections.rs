/// Collection endpoints
///
/// Collection CRUD, membership management, and whole-collection playback.
/// Every endpoint here operates on the authenticated user's own
/// collections; touching someone else's collection is a 403, a missing one
/// a 404.
///
/// # Endpoints
///
/// - `GET    /v1/collections` - List own collections (name ASC, with
///   song count and total duration)
/// - `POST   /v1/collections` - Create a collection
/// - `GET    /v1/collections/:id` - Collection details and member songs
/// - `PUT    /v1/collections/:id` - Rename
/// - `DELETE /v1/collections/:id` - Delete
/// - `POST   /v1/collections/:id/songs` - Add a song
/// - `DELETE /v1/collections/:id/songs/:song_id` - Remove a song
/// - `POST   /v1/collections/:id/play` - Play every member song

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tunevault_shared::{
    auth::{middleware::AuthContext, ownership::require_collection_owner},
    models::{
        collection::{Collection, CollectionSummary, CreateCollection},
        collection_song::CollectionSong,
        song::Song,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create collection request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    /// Collection name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Rename collection request
#[derive(Debug, Deserialize, Validate)]
pub struct RenameCollectionRequest {
    /// New collection name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Add song request
#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    /// Song to add
    pub song_id: Uuid,
}

/// Collection details response: the collection and its member songs
#[derive(Debug, Serialize)]
pub struct CollectionDetailResponse {
    pub collection: Collection,
    pub songs: Vec<Song>,
}

/// Play collection response
#[derive(Debug, Serialize)]
pub struct PlayCollectionResponse {
    /// Number of songs whose play count was incremented
    pub songs_played: u64,
}

/// Lists the authenticated user's collections
///
/// Ordered by name, each with its song count and combined duration.
pub async fn list_collections(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<CollectionSummary>>> {
    let collections = Collection::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(collections))
}

/// Creates a new, empty collection owned by the authenticated user
///
/// # Errors
///
/// - `409 Conflict`: The user already has a collection with this name
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_collection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCollectionRequest>,
) -> ApiResult<(StatusCode, Json<Collection>)> {
    req.validate()?;

    let collection = Collection::create(
        &state.db,
        CreateCollection {
            user_id: auth.user_id,
            name: req.name,
        },
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        collection_id = %collection.id,
        "Collection created"
    );

    Ok((StatusCode::CREATED, Json(collection)))
}

/// Returns a collection and its member songs
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection does not exist
pub async fn get_collection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(collection_id): Path<Uuid>,
) -> ApiResult<Json<CollectionDetailResponse>> {
    let collection = require_collection_owner(&state.db, collection_id, auth.user_id).await?;
    let songs = CollectionSong::list_songs(&state.db, collection_id).await?;

    Ok(Json(CollectionDetailResponse { collection, songs }))
}

/// Renames a collection
///
/// The membership set and the identifier are unchanged; only the name
/// field moves.
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection does not exist
/// - `409 Conflict`: The user already has a collection with the new name
pub async fn rename_collection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(collection_id): Path<Uuid>,
    Json(req): Json<RenameCollectionRequest>,
) -> ApiResult<Json<Collection>> {
    req.validate()?;

    require_collection_owner(&state.db, collection_id, auth.user_id).await?;

    let collection = Collection::rename(&state.db, collection_id, &req.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))?;

    tracing::info!(
        user_id = %auth.user_id,
        collection_id = %collection_id,
        "Collection renamed"
    );

    Ok(Json(collection))
}

/// Deletes a collection
///
/// Membership rows cascade away with it; the songs stay in the catalog.
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection does not exist
pub async fn delete_collection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(collection_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    require_collection_owner(&state.db, collection_id, auth.user_id).await?;

    Collection::delete(&state.db, collection_id).await?;

    tracing::info!(
        user_id = %auth.user_id,
        collection_id = %collection_id,
        "Collection deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Adds a song to a collection
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection or song does not exist
/// - `409 Conflict`: Song is already in the collection
pub async fn add_song(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(collection_id): Path<Uuid>,
    Json(req): Json<AddSongRequest>,
) -> ApiResult<(StatusCode, Json<CollectionSong>)> {
    require_collection_owner(&state.db, collection_id, auth.user_id).await?;

    let membership = CollectionSong::add(&state.db, collection_id, req.song_id).await?;

    tracing::debug!(
        collection_id = %collection_id,
        song_id = %req.song_id,
        "Song added to collection"
    );

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Removes a song from a collection
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection does not exist, or the song is not in it
pub async fn remove_song(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((collection_id, song_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    require_collection_owner(&state.db, collection_id, auth.user_id).await?;

    let removed = CollectionSong::remove(&state.db, collection_id, song_id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "Song is not in that collection".to_string(),
        ));
    }

    tracing::debug!(
        collection_id = %collection_id,
        song_id = %song_id,
        "Song removed from collection"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Plays every song in a collection
///
/// One batch update; each member song's play count goes up by exactly one.
/// Playing an empty collection reports zero songs played.
///
/// # Errors
///
/// - `403 Forbidden`: Collection belongs to another user
/// - `404 Not Found`: Collection does not exist
pub async fn play_collection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(collection_id): Path<Uuid>,
) -> ApiResult<Json<PlayCollectionResponse>> {
    require_collection_owner(&state.db, collection_id, auth.user_id).await?;

    let songs_played = Song::play_collection(&state.db, collection_id).await?;

    tracing::info!(
        user_id = %auth.user_id,
        collection_id = %collection_id,
        songs_played,
        "Collection played"
    );

    Ok(Json(PlayCollectionResponse { songs_played }))
}
