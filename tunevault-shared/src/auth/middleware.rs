/// Authentication context for Axum handlers
///
/// The API's session middleware validates the `Bearer` token on each
/// authenticated request and inserts an [`AuthContext`] into the request
/// extensions. Handlers extract it with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use tunevault_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors raised while extracting credentials from a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header was present
    #[error("Missing credentials")]
    MissingCredentials,

    /// The Authorization header was not a Bearer token
    #[error("Invalid credential format: {0}")]
    InvalidFormat(String),

    /// The token failed validation
    #[error("Invalid session token: {0}")]
    InvalidToken(String),
}

/// Authentication context added to request extensions after a session token
/// validates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated session claims
    pub fn from_session(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
