/// Ownership checks for user-owned resources
///
/// A collection always belongs to exactly one user, and only that user may
/// read, rename, delete, or play it. Handlers resolve the collection and its
/// owner in one place so "does not exist" and "belongs to someone else" stay
/// distinct errors (404 vs 403 at the HTTP boundary).
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::auth::ownership::require_collection_owner;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, collection_id: Uuid, user_id: Uuid)
/// #     -> Result<(), Box<dyn std::error::Error>> {
/// let collection = require_collection_owner(&pool, collection_id, user_id).await?;
/// println!("Operating on collection {}", collection.name);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::collection::Collection;

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// The collection does not exist
    #[error("Collection {0} not found")]
    NotFound(Uuid),

    /// The collection belongs to a different user
    #[error("Collection {0} is owned by another user")]
    NotOwner(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Resolves a collection and verifies the requesting user owns it
///
/// # Returns
///
/// The collection row on success, so callers don't query it twice.
///
/// # Errors
///
/// - `OwnershipError::NotFound` if no collection has this ID
/// - `OwnershipError::NotOwner` if it belongs to a different user
pub async fn require_collection_owner(
    pool: &PgPool,
    collection_id: Uuid,
    user_id: Uuid,
) -> Result<Collection, OwnershipError> {
    let collection = Collection::find_by_id(pool, collection_id)
        .await?
        .ok_or(OwnershipError::NotFound(collection_id))?;

    if collection.user_id != user_id {
        return Err(OwnershipError::NotOwner(collection_id));
    }

    Ok(collection)
}
