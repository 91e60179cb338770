/// Authentication and authorization utilities
///
/// This module provides the authentication primitives for TuneVault:
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing and verification
/// - [`session`]: signed session tokens (HS256) for the logged-in state
/// - [`middleware`]: the `AuthContext` injected into authenticated requests
/// - [`ownership`]: collection ownership checks
///
/// # Example
///
/// ```no_run
/// use tunevault_shared::auth::password::{hash_password, verify_password};
/// use tunevault_shared::auth::session::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Credential check
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token for the logged-in user
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod ownership;
pub mod password;
pub mod session;
