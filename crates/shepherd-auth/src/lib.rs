//! # Shepherd Auth
//!
//! Authentication types and JWT utilities for the Shepherd API.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`jwt`]: Token creation and verification utilities
//!
//! # Token Types
//!
//! - **Access Token**: short-lived, presented on every request. Carries only
//!   the subject id; role and department assignments are looked up fresh per
//!   request so a demoted or deactivated account loses access as soon as the
//!   next lookup happens, not when the token expires.
//! - **Refresh Token** ([`RefreshTokenClaims`]): long-lived, only accepted by
//!   the refresh endpoint, rotated on every use.
//!
//! # Example
//!
//! ```ignore
//! use shepherd_auth::{create_access_token, verify_access_token};
//! use shepherd_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, RefreshTokenClaims, TokenType};
pub use jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
};
