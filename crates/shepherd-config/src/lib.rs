//! # Shepherd Config
//!
//! Environment-driven configuration for the Shepherd API.
//!
//! Configuration is read once at startup via `from_env` constructors with
//! sensible development defaults; production deployments are expected to set
//! every variable explicitly.

use std::env;

/// JWT signing configuration.
///
/// # Environment variables
///
/// - `JWT_SECRET`: signing secret (change it in production)
/// - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 1 hour)
/// - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 7 days)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }

    /// Fixed configuration for tests; never reads the environment.
    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }
}
