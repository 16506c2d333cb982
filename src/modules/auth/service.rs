//! Authentication service.

use std::str::FromStr;

use shepherd_auth::{create_access_token, create_refresh_token, verify_refresh_token};
use shepherd_config::JwtConfig;
use shepherd_core::errors::{AppError, AuthError};
use shepherd_core::password::verify_password;
use shepherd_models::ids::UserId;
use shepherd_models::users::{LoginRequest, TokenPair, User};
use tracing::instrument;
use validator::Validate;

use crate::principal::Principal;
use crate::store::UserStore;

pub struct AuthService;

impl AuthService {
    /// Exchange credentials for a token pair.
    ///
    /// A wrong email and a wrong password fail identically so the endpoint
    /// cannot be used to enumerate accounts.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login<S: UserStore>(
        store: &S,
        jwt_config: &JwtConfig,
        request: LoginRequest,
    ) -> Result<TokenPair, AppError> {
        request.validate()?;

        let user = store
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredential)?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "login failed: wrong password");
            return Err(AuthError::InvalidCredential.into());
        }

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "login attempt on inactive account");
            return Err(AuthError::InactiveAccount.into());
        }

        Self::issue_pair(&user, jwt_config)
    }

    /// Exchange a refresh token for a fresh pair (rotation: the new pair
    /// includes a new refresh token).
    #[instrument(skip_all)]
    pub async fn refresh<S: UserStore>(
        store: &S,
        jwt_config: &JwtConfig,
        refresh_token: &str,
    ) -> Result<TokenPair, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let user_id = UserId::from_str(&claims.sub).map_err(|_| AuthError::InvalidCredential)?;

        // Re-check the account on every refresh: a deactivated user's
        // outstanding refresh tokens must stop working immediately.
        let user = store
            .find_user(user_id)
            .await?
            .ok_or(AuthError::UnknownPrincipal)?;
        if !user.is_active {
            return Err(AuthError::InactiveAccount.into());
        }

        Self::issue_pair(&user, jwt_config)
    }

    /// The caller's own account row.
    #[instrument(skip_all, fields(user_id = %principal.id))]
    pub async fn me<S: UserStore>(
        store: &S,
        principal: &Principal,
    ) -> Result<User, AppError> {
        store
            .find_user(principal.id)
            .await?
            .ok_or(AuthError::UnknownPrincipal.into())
    }

    fn issue_pair(user: &User, jwt_config: &JwtConfig) -> Result<TokenPair, AppError> {
        let access = create_access_token(user.id.into_inner(), jwt_config)?;
        let refresh = create_refresh_token(user.id.into_inner(), jwt_config)?;
        tracing::debug!(user_id = %user.id, "issued token pair");
        Ok(TokenPair::bearer(access, refresh))
    }
}
