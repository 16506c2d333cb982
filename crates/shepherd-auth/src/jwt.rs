//! JWT creation and verification.
//!
//! Every verification failure collapses to [`AuthError::InvalidCredential`]:
//! expired, malformed, bad signature, and wrong token type are all the same
//! to the caller. The distinction is not security-relevant to expose and
//! would otherwise leak which tokens are structurally valid.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use shepherd_config::JwtConfig;
use shepherd_core::errors::{AppError, AuthError};

use crate::claims::{Claims, RefreshTokenClaims, TokenType};

/// Creates a short-lived access token for the given user.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        token_type: TokenType::Access,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Creates a long-lived refresh token for the given user.
pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.refresh_token_expiry as usize;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        token_type: TokenType::Refresh,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidCredential)?;

    if claims.token_type != TokenType::Access {
        return Err(AuthError::InvalidCredential);
    }

    Ok(claims)
}

/// Verifies a refresh token and returns the embedded claims.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AuthError> {
    let claims = decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidCredential)?;

    if claims.token_type != TokenType::Refresh {
        return Err(AuthError::InvalidCredential);
    }

    Ok(claims)
}
