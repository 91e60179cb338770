/// Song catalog model, search, and play counting
///
/// The catalog is pre-populated by the setup path; the application reads it,
/// searches it, and increments play counts. Songs are never deleted by
/// normal use.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE songs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     artist TEXT NOT NULL,
///     album TEXT,
///     genre TEXT,
///     duration_seconds INTEGER CHECK (duration_seconds > 0),
///     release_date DATE,
///     play_count BIGINT NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::models::song::{SearchField, Song, SortKey, SortOrder};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let hits = Song::search(
///     &pool,
///     SearchField::Artist,
///     "coltrane",
///     SortKey::Title,
///     SortOrder::Asc,
/// )
/// .await?;
///
/// for song in hits {
///     println!("{} — {} ({} plays)", song.artist, song.title, song.play_count);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Searchable song fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Artist,
    Album,
    Genre,
}

impl SearchField {
    /// Column name for the field; a closed set, so never user-controlled SQL
    pub fn as_column(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Artist => "artist",
            SearchField::Album => "album",
            SearchField::Genre => "genre",
        }
    }
}

impl Default for SearchField {
    fn default() -> Self {
        SearchField::Title
    }
}

/// Sort keys accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Artist,
    Album,
    Genre,
    PlayCount,
    ReleaseDate,
}

impl SortKey {
    pub fn as_column(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Artist => "artist",
            SortKey::Album => "album",
            SortKey::Genre => "genre",
            SortKey::PlayCount => "play_count",
            SortKey::ReleaseDate => "release_date",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Title
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

/// Song model representing one catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    /// Unique song ID
    pub id: Uuid,

    /// Song title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Album the song appears on, if any
    pub album: Option<String>,

    /// Genre label, if any
    pub genre: Option<String>,

    /// Track length in seconds
    pub duration_seconds: Option<i32>,

    /// Release date, if known
    pub release_date: Option<NaiveDate>,

    /// How many times the song has been played
    pub play_count: i64,

    /// When the catalog entry was created
    pub created_at: DateTime<Utc>,
}

/// Input for adding a song to the catalog (setup path and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

const SONG_COLUMNS: &str =
    "id, title, artist, album, genre, duration_seconds, release_date, play_count, created_at";

impl Song {
    /// Inserts a new catalog entry with a zero play count
    pub async fn create(pool: &PgPool, data: CreateSong) -> Result<Self, sqlx::Error> {
        let song = sqlx::query_as::<_, Song>(
            r#"
            INSERT INTO songs (title, artist, album, genre, duration_seconds, release_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, artist, album, genre, duration_seconds, release_date,
                      play_count, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.artist)
        .bind(data.album)
        .bind(data.genre)
        .bind(data.duration_seconds)
        .bind(data.release_date)
        .fetch_one(pool)
        .await?;

        Ok(song)
    }

    /// Finds a song by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(song)
    }

    /// Searches the catalog
    ///
    /// Case-insensitive substring match on the chosen field; an empty query
    /// matches the whole catalog. No matches is an empty vector, not an
    /// error. The secondary title sort keeps the order stable when the
    /// primary key ties.
    pub async fn search(
        pool: &PgPool,
        field: SearchField,
        query: &str,
        sort_by: SortKey,
        order: SortOrder,
    ) -> Result<Vec<Self>, sqlx::Error> {
        // Column and direction come from closed enums, only the pattern is
        // bound user input.
        let sql = if query.is_empty() {
            format!(
                "SELECT {SONG_COLUMNS} FROM songs ORDER BY {} {}, title ASC",
                sort_by.as_column(),
                order.as_sql(),
            )
        } else {
            format!(
                "SELECT {SONG_COLUMNS} FROM songs WHERE {} ILIKE $1 ORDER BY {} {}, title ASC",
                field.as_column(),
                sort_by.as_column(),
                order.as_sql(),
            )
        };

        let songs = if query.is_empty() {
            sqlx::query_as::<_, Song>(&sql).fetch_all(pool).await?
        } else {
            let pattern = format!("%{}%", query);
            sqlx::query_as::<_, Song>(&sql)
                .bind(pattern)
                .fetch_all(pool)
                .await?
        };

        Ok(songs)
    }

    /// Records one play of a song
    ///
    /// # Returns
    ///
    /// The updated play count, or None if the song does not exist
    pub async fn play(pool: &PgPool, id: Uuid) -> Result<Option<i64>, sqlx::Error> {
        let count: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE songs
            SET play_count = play_count + 1
            WHERE id = $1
            RETURNING play_count
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(count.map(|(c,)| c))
    }

    /// Records one play for every song in a collection
    ///
    /// A single batch update over the membership set; no per-song ordering.
    ///
    /// # Returns
    ///
    /// The number of songs whose play count was incremented
    pub async fn play_collection(pool: &PgPool, collection_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE songs
            SET play_count = play_count + 1
            WHERE id IN (
                SELECT song_id FROM collection_songs WHERE collection_id = $1
            )
            "#,
        )
        .bind(collection_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
