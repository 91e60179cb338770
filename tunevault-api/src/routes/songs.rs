/// Song catalog endpoints
///
/// Search, single-song playback, and ratings. The catalog itself is
/// read-only through the API; only play counts and ratings change.
///
/// # Endpoints
///
/// - `GET  /v1/songs/search?field=artist&q=coltrane&sort=play_count&order=desc`
/// - `POST /v1/songs/:id/play`
/// - `PUT  /v1/songs/:id/rating`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tunevault_shared::{
    auth::middleware::AuthContext,
    models::{
        rating::SongRating,
        song::{SearchField, Song, SortKey, SortOrder},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Search query parameters
///
/// Every parameter is optional: the default is the whole catalog ordered by
/// title ascending.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Field to match against (title, artist, album, genre)
    #[serde(default)]
    pub field: SearchField,

    /// Substring to search for; empty matches everything
    #[serde(default)]
    pub q: String,

    /// Sort key (title, artist, album, genre, play_count, release_date)
    #[serde(default)]
    pub sort: SortKey,

    /// Sort direction (asc, desc)
    #[serde(default)]
    pub order: SortOrder,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matching songs in the requested order
    pub songs: Vec<Song>,
}

/// Play song response
#[derive(Debug, Serialize)]
pub struct PlaySongResponse {
    /// The song that was played
    pub song_id: Uuid,

    /// Play count after this play
    pub play_count: i64,
}

/// Rate song request
#[derive(Debug, Deserialize, Validate)]
pub struct RateSongRequest {
    /// Rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Searches the song catalog
///
/// Case-insensitive substring match on the chosen field. No matches is an
/// empty list, not an error.
///
/// # Example
///
/// ```text
/// GET /v1/songs/search?field=genre&q=jazz&sort=play_count&order=desc
/// ```
pub async fn search_songs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    tracing::debug!(
        user_id = %auth.user_id,
        field = ?params.field,
        query = %params.q,
        "Searching songs"
    );

    let songs = Song::search(&state.db, params.field, &params.q, params.sort, params.order)
        .await?;

    Ok(Json(SearchResponse { songs }))
}

/// Plays a single song, incrementing its play count by exactly one
///
/// # Errors
///
/// - `404 Not Found`: Song does not exist
pub async fn play_song(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(song_id): Path<Uuid>,
) -> ApiResult<Json<PlaySongResponse>> {
    let play_count = Song::play(&state.db, song_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Song not found".to_string()))?;

    tracing::info!(user_id = %auth.user_id, song_id = %song_id, play_count, "Song played");

    Ok(Json(PlaySongResponse {
        song_id,
        play_count,
    }))
}

/// Sets the authenticated user's rating for a song
///
/// Rating again replaces the previous value.
///
/// # Errors
///
/// - `404 Not Found`: Song does not exist
/// - `422 Unprocessable Entity`: Rating outside 1..=5
pub async fn rate_song(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(song_id): Path<Uuid>,
    Json(req): Json<RateSongRequest>,
) -> ApiResult<Json<SongRating>> {
    req.validate()?;

    // The foreign key turns an unknown song into an error; map it to 404
    let rating = SongRating::upsert(&state.db, auth.user_id, song_id, req.rating).await?;

    tracing::debug!(
        user_id = %auth.user_id,
        song_id = %song_id,
        rating = req.rating,
        "Song rated"
    );

    Ok(Json(rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let params = SearchParams::default();
        assert_eq!(params.field, SearchField::Title);
        assert!(params.q.is_empty());
        assert_eq!(params.sort, SortKey::Title);
        assert_eq!(params.order, SortOrder::Asc);
    }

    #[test]
    fn test_rate_song_request_validation() {
        assert!(RateSongRequest { rating: 1 }.validate().is_ok());
        assert!(RateSongRequest { rating: 5 }.validate().is_ok());
        assert!(RateSongRequest { rating: 0 }.validate().is_err());
        assert!(RateSongRequest { rating: 6 }.validate().is_err());
    }

    #[test]
    fn test_play_song_response_serialization() {
        let response = PlaySongResponse {
            song_id: Uuid::new_v4(),
            play_count: 12,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"play_count\":12"));
    }
}
