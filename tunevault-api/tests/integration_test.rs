/// Integration tests for the TuneVault API
///
/// These tests verify the full system works end-to-end against a real
/// database:
/// - Registration and login
/// - Collection lifecycle (create → rename → delete) and ownership
/// - Membership and cascade behavior
/// - Catalog search
/// - Playback counting for songs and collections
/// - Ratings and follows

mod common;

use axum::http::StatusCode;
use common::{assert_status, cleanup_songs, create_test_song, json_body, TestContext};
use serde_json::json;
use tunevault_shared::models::collection_song::CollectionSong;
use tunevault_shared::models::song::Song;
use uuid::Uuid;

/// Registering a fresh username succeeds; registering it again conflicts;
/// logging in with the same credentials succeeds afterwards
#[tokio::test]
async fn test_register_duplicate_and_login() {
    let ctx = TestContext::new().await.unwrap();

    let suffix = Uuid::new_v4();
    let username = format!("fresh-user-{}", suffix);
    let email = format!("fresh-{}@example.com", suffix);

    // Fresh registration succeeds
    let response = ctx
        .send_as(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "username": username,
                "password": "a-long-password",
                "email": email,
            })),
        )
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let user_id: Uuid = body["user_id"].as_str().unwrap().parse().unwrap();
    assert_eq!(body["username"], username.as_str());

    // Same username again fails with a conflict
    let response = ctx
        .send_as(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "username": username,
                "password": "a-long-password",
                "email": format!("second-{}@example.com", suffix),
            })),
        )
        .await;
    let body = assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(body["error"], "conflict");

    // Login with the registered credentials succeeds and returns a token
    let response = ctx
        .send_as(
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({
                "username": username,
                "password": "a-long-password",
            })),
        )
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user_id"], user_id.to_string());

    // Wrong password is rejected
    let response = ctx
        .send_as(
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({
                "username": username,
                "password": "wrong-password",
            })),
        )
        .await;
    assert_status(response, StatusCode::UNAUTHORIZED).await;

    tunevault_shared::models::user::User::delete(&ctx.db, user_id)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

/// Authenticated routes reject requests without a session token
#[tokio::test]
async fn test_authentication_required() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send_as("GET", "/v1/collections", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = ctx
        .send_as("GET", "/v1/collections", Some("not-a-real-token"), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Collection create / list / rename / delete lifecycle
#[tokio::test]
async fn test_collection_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    // Create
    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Road Trip" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    // Duplicate name for the same owner conflicts
    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Road Trip" })))
        .await;
    assert_status(response, StatusCode::CONFLICT).await;

    // Listed under the owner
    let response = ctx.send("GET", "/v1/collections", None).await;
    let body = assert_status(response, StatusCode::OK).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Road Trip"));

    // Rename keeps the identifier
    let response = ctx
        .send(
            "PUT",
            &format!("/v1/collections/{}", collection_id),
            Some(json!({ "name": "Road Trip 2" })),
        )
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["id"], collection_id.to_string());
    assert_eq!(body["name"], "Road Trip 2");

    // Delete
    let response = ctx
        .send("DELETE", &format!("/v1/collections/{}", collection_id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone now
    let response = ctx
        .send("GET", &format!("/v1/collections/{}", collection_id), None)
        .await;
    assert_status(response, StatusCode::NOT_FOUND).await;

    ctx.cleanup().await.unwrap();
}

/// Deleting a collection removes its membership rows but not the songs
#[tokio::test]
async fn test_delete_collection_removes_memberships() {
    let ctx = TestContext::new().await.unwrap();

    let song_a = create_test_song(&ctx, &format!("Song A {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();
    let song_b = create_test_song(&ctx, &format!("Song B {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();

    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Doomed" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    for song in [&song_a, &song_b] {
        let response = ctx
            .send(
                "POST",
                &format!("/v1/collections/{}/songs", collection_id),
                Some(json!({ "song_id": song.id })),
            )
            .await;
        assert_status(response, StatusCode::CREATED).await;
    }

    let response = ctx
        .send("DELETE", &format!("/v1/collections/{}", collection_id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Membership rows are gone, listing the collection's songs is empty
    let songs = CollectionSong::list_songs(&ctx.db, collection_id)
        .await
        .unwrap();
    assert!(songs.is_empty());

    // The songs themselves survive
    assert!(Song::find_by_id(&ctx.db, song_a.id).await.unwrap().is_some());
    assert!(Song::find_by_id(&ctx.db, song_b.id).await.unwrap().is_some());

    cleanup_songs(&ctx, &[song_a.id, song_b.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Adding the same song twice conflicts; removing it works once
#[tokio::test]
async fn test_membership_add_remove() {
    let ctx = TestContext::new().await.unwrap();

    let song = create_test_song(&ctx, &format!("Member {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();

    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Members" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    let uri = format!("/v1/collections/{}/songs", collection_id);
    let response = ctx.send("POST", &uri, Some(json!({ "song_id": song.id }))).await;
    assert_status(response, StatusCode::CREATED).await;

    // Second add of the same song conflicts
    let response = ctx.send("POST", &uri, Some(json!({ "song_id": song.id }))).await;
    assert_status(response, StatusCode::CONFLICT).await;

    // Remove succeeds, second remove is a 404
    let remove_uri = format!("/v1/collections/{}/songs/{}", collection_id, song.id);
    let response = ctx.send("DELETE", &remove_uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.send("DELETE", &remove_uri, None).await;
    assert_status(response, StatusCode::NOT_FOUND).await;

    cleanup_songs(&ctx, &[song.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Searching by exact title finds the song; a nonsense title finds nothing
#[tokio::test]
async fn test_search_songs() {
    let ctx = TestContext::new().await.unwrap();

    let title = format!("Unmistakable Title {}", Uuid::new_v4());
    let song = create_test_song(&ctx, &title, "Search Artist").await.unwrap();

    let response = ctx
        .send(
            "GET",
            &format!("/v1/songs/search?field=title&q={}", song.id),
            None,
        )
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert!(body["songs"].as_array().unwrap().is_empty());

    // URL-encode the spaces in the title
    let encoded = title.replace(' ', "%20");
    let response = ctx
        .send("GET", &format!("/v1/songs/search?field=title&q={}", encoded), None)
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["title"], title.as_str());
    assert_eq!(songs[0]["id"], song.id.to_string());

    // Unknown search fields are rejected rather than guessed
    let response = ctx
        .send("GET", "/v1/songs/search?field=composer&q=x", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup_songs(&ctx, &[song.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Playing a song increments its play count by exactly 1
#[tokio::test]
async fn test_play_song_increments_count() {
    let ctx = TestContext::new().await.unwrap();

    let song = create_test_song(&ctx, &format!("Played {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();
    assert_eq!(song.play_count, 0);

    let response = ctx
        .send("POST", &format!("/v1/songs/{}/play", song.id), None)
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["play_count"], 1);

    let reloaded = Song::find_by_id(&ctx.db, song.id).await.unwrap().unwrap();
    assert_eq!(reloaded.play_count, 1);

    // Playing an unknown song is a 404
    let response = ctx
        .send("POST", &format!("/v1/songs/{}/play", Uuid::new_v4()), None)
        .await;
    assert_status(response, StatusCode::NOT_FOUND).await;

    cleanup_songs(&ctx, &[song.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Playing a collection increments every member song's play count by 1
#[tokio::test]
async fn test_play_collection_increments_members() {
    let ctx = TestContext::new().await.unwrap();

    let song_a = create_test_song(&ctx, &format!("Batch A {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();
    let song_b = create_test_song(&ctx, &format!("Batch B {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();
    let bystander = create_test_song(&ctx, &format!("Bystander {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();

    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Batch" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    for song in [&song_a, &song_b] {
        let response = ctx
            .send(
                "POST",
                &format!("/v1/collections/{}/songs", collection_id),
                Some(json!({ "song_id": song.id })),
            )
            .await;
        assert_status(response, StatusCode::CREATED).await;
    }

    let response = ctx
        .send("POST", &format!("/v1/collections/{}/play", collection_id), None)
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["songs_played"], 2);

    for song in [&song_a, &song_b] {
        let reloaded = Song::find_by_id(&ctx.db, song.id).await.unwrap().unwrap();
        assert_eq!(reloaded.play_count, 1);
    }

    // A song outside the collection is untouched
    let reloaded = Song::find_by_id(&ctx.db, bystander.id).await.unwrap().unwrap();
    assert_eq!(reloaded.play_count, 0);

    cleanup_songs(&ctx, &[song_a.id, song_b.id, bystander.id])
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

/// Renaming a collection preserves its membership set and identifier
#[tokio::test]
async fn test_rename_preserves_membership() {
    let ctx = TestContext::new().await.unwrap();

    let song = create_test_song(&ctx, &format!("Kept {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();

    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Before" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    let response = ctx
        .send(
            "POST",
            &format!("/v1/collections/{}/songs", collection_id),
            Some(json!({ "song_id": song.id })),
        )
        .await;
    assert_status(response, StatusCode::CREATED).await;

    let response = ctx
        .send(
            "PUT",
            &format!("/v1/collections/{}", collection_id),
            Some(json!({ "name": "After" })),
        )
        .await;
    assert_status(response, StatusCode::OK).await;

    let response = ctx
        .send("GET", &format!("/v1/collections/{}", collection_id), None)
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["collection"]["id"], collection_id.to_string());
    assert_eq!(body["collection"]["name"], "After");

    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["id"], song.id.to_string());

    cleanup_songs(&ctx, &[song.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// A user cannot rename or delete a collection owned by a different user
#[tokio::test]
async fn test_collection_ownership_enforced() {
    let ctx = TestContext::new().await.unwrap();
    let (other_user, other_token) = ctx.create_other_user().await.unwrap();

    let response = ctx
        .send("POST", "/v1/collections", Some(json!({ "name": "Private" })))
        .await;
    let body = assert_status(response, StatusCode::CREATED).await;
    let collection_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    // The other user cannot rename, delete, or even read it
    let response = ctx
        .send_as(
            "PUT",
            &format!("/v1/collections/{}", collection_id),
            Some(&other_token),
            Some(json!({ "name": "Hijacked" })),
        )
        .await;
    assert_status(response, StatusCode::FORBIDDEN).await;

    let response = ctx
        .send_as(
            "DELETE",
            &format!("/v1/collections/{}", collection_id),
            Some(&other_token),
            None,
        )
        .await;
    assert_status(response, StatusCode::FORBIDDEN).await;

    let response = ctx
        .send_as(
            "GET",
            &format!("/v1/collections/{}", collection_id),
            Some(&other_token),
            None,
        )
        .await;
    assert_status(response, StatusCode::FORBIDDEN).await;

    // The owner still sees it untouched
    let response = ctx
        .send("GET", &format!("/v1/collections/{}", collection_id), None)
        .await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["collection"]["name"], "Private");

    tunevault_shared::models::user::User::delete(&ctx.db, other_user.id)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

/// Rating a song twice keeps one row with the latest value; out-of-range
/// ratings are rejected
#[tokio::test]
async fn test_rating_upsert() {
    let ctx = TestContext::new().await.unwrap();

    let song = create_test_song(&ctx, &format!("Rated {}", Uuid::new_v4()), "Artist")
        .await
        .unwrap();
    let uri = format!("/v1/songs/{}/rating", song.id);

    let response = ctx.send("PUT", &uri, Some(json!({ "rating": 3 }))).await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["rating"], 3);

    let response = ctx.send("PUT", &uri, Some(json!({ "rating": 5 }))).await;
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["rating"], 5);

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM song_ratings WHERE user_id = $1 AND song_id = $2")
            .bind(ctx.user.id)
            .bind(song.id)
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    assert_eq!(count, 1);

    let response = ctx.send("PUT", &uri, Some(json!({ "rating": 6 }))).await;
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;

    cleanup_songs(&ctx, &[song.id]).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Follow / unfollow flow, including the self-follow rejection
#[tokio::test]
async fn test_follow_unfollow() {
    let ctx = TestContext::new().await.unwrap();
    let (other_user, _) = ctx.create_other_user().await.unwrap();

    // Follow
    let response = ctx
        .send("POST", &format!("/v1/users/{}/follow", other_user.id), None)
        .await;
    assert_status(response, StatusCode::CREATED).await;

    // Following again conflicts
    let response = ctx
        .send("POST", &format!("/v1/users/{}/follow", other_user.id), None)
        .await;
    assert_status(response, StatusCode::CONFLICT).await;

    // Self-follow is rejected
    let response = ctx
        .send("POST", &format!("/v1/users/{}/follow", ctx.user.id), None)
        .await;
    assert_status(response, StatusCode::BAD_REQUEST).await;

    // The listing reflects the follow state
    let response = ctx.send("GET", "/v1/users", None).await;
    let body = json_body(response).await;
    let entry = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["user_id"] == other_user.id.to_string())
        .expect("other user should be listed");
    assert_eq!(entry["following"], true);

    // Unfollow, then unfollowing again is a 404
    let response = ctx
        .send("DELETE", &format!("/v1/users/{}/follow", other_user.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .send("DELETE", &format!("/v1/users/{}/follow", other_user.id), None)
        .await;
    assert_status(response, StatusCode::NOT_FOUND).await;

    tunevault_shared::models::user::User::delete(&ctx.db, other_user.id)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}
