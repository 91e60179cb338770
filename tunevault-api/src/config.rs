/// Configuration management for the API server
///
/// Configuration is read once at process start from environment variables
/// into an explicit struct that is handed to the application state; nothing
/// reads the environment after startup.
///
/// # Environment Variables
///
/// - `DATABASE_USER`: database role name (required unless `DATABASE_URL` set)
/// - `DATABASE_PASSWORD`: database password (required unless `DATABASE_URL` set)
/// - `DATABASE_NAME`: database name (required unless `DATABASE_URL` set)
/// - `DATABASE_HOST`: database host (default: localhost)
/// - `DATABASE_PORT`: database port (default: 5432)
/// - `DATABASE_URL`: full connection string, overrides the pieces above
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `SESSION_SECRET`: secret key for session token signing (required)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `RUST_LOG`: log filter (default: info)
///
/// # Example
///
/// ```no_run
/// use tunevault_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub session: SessionConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret key for session token signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let user = env::var("DATABASE_USER").map_err(|_| {
                    anyhow::anyhow!("DATABASE_USER (or DATABASE_URL) environment variable is required")
                })?;
                let password = env::var("DATABASE_PASSWORD").map_err(|_| {
                    anyhow::anyhow!("DATABASE_PASSWORD (or DATABASE_URL) environment variable is required")
                })?;
                let name = env::var("DATABASE_NAME").map_err(|_| {
                    anyhow::anyhow!("DATABASE_NAME (or DATABASE_URL) environment variable is required")
                })?;
                let host = env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string());
                let port = env::var("DATABASE_PORT")
                    .unwrap_or_else(|_| "5432".to_string())
                    .parse::<u16>()?;

                format!("postgresql://{}:{}@{}:{}/{}", user, password, host, port, name)
            }
        };

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig {
                secret: session_secret,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            session: SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_clone() {
        let config = test_config();
        let cloned = config.clone();
        assert_eq!(config.database.url, cloned.database.url);
        assert_eq!(config.session.secret, cloned.session.secret);
    }
}
