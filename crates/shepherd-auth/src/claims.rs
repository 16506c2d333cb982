//! JWT claim structures for authentication tokens.

use serde::{Deserialize, Serialize};

/// Discriminator embedded in every token so a refresh token can never be
/// replayed against an access-token endpoint and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims for access tokens.
///
/// Deliberately minimal: the subject id is the only identity material.
/// Role and department scope are resolved from the user store on every
/// request, so the token stays valid across role changes without granting
/// stale authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token type discriminator (always `access` here)
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// JWT claims for refresh tokens.
///
/// Refresh tokens are long-lived and only good for obtaining a fresh token
/// pair. The `jti` makes every issued refresh token unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token type discriminator (always `refresh` here)
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier (JWT ID)
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            token_type: TokenType::Access,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""type":"access""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","type":"access","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_claims_serialize() {
        let claims = RefreshTokenClaims {
            sub: "user-123".to_string(),
            token_type: TokenType::Refresh,
            exp: 1234567890,
            iat: 1234567800,
            jti: "test-jti-123".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""type":"refresh""#));
        assert!(serialized.contains(r#""jti":"test-jti-123""#));
    }
}
