//! Credential resolution: turning a bearer token into a [`Principal`].
//!
//! The access token carries only the subject id. Role and department
//! assignments are looked up fresh on every resolution, so a demotion or an
//! unassignment takes effect on the next request without waiting for token
//! expiry.

use std::collections::BTreeSet;
use std::str::FromStr;

use shepherd_config::JwtConfig;
use shepherd_core::errors::{AppError, AuthError};
use shepherd_models::ids::{DepartmentId, UserId};
use shepherd_models::roles::Role;
use shepherd_models::users::User;

use crate::store::UserStore;

/// An immutable snapshot of the caller, captured once per request.
///
/// Every authorization decision for the request reads this snapshot, so a
/// concurrent role or assignment change cannot produce a half-old half-new
/// decision mid-request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub departments: BTreeSet<DepartmentId>,
}

impl Principal {
    /// Snapshot a persisted user row.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            departments: user.department_ids.clone(),
        }
    }

    /// Whether the principal is assigned to the given department.
    ///
    /// Super Admins are implicitly assigned everywhere.
    pub fn is_assigned_to(&self, department_id: DepartmentId) -> bool {
        self.role.is_super_admin() || self.departments.contains(&department_id)
    }
}

/// Resolves access tokens into [`Principal`] snapshots.
#[derive(Debug, Clone)]
pub struct PrincipalResolver {
    jwt_config: JwtConfig,
}

impl PrincipalResolver {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self { jwt_config }
    }

    /// Verify `token` and load its subject.
    ///
    /// Fails with `Unauthorized` when the token is invalid, the subject no
    /// longer exists, or the account has been deactivated.
    #[tracing::instrument(skip(self, store, token))]
    pub async fn resolve<S: UserStore>(
        &self,
        store: &S,
        token: &str,
    ) -> Result<Principal, AppError> {
        let claims = shepherd_auth::verify_access_token(token, &self.jwt_config)?;

        let user_id =
            UserId::from_str(&claims.sub).map_err(|_| AuthError::InvalidCredential)?;

        let user = store
            .find_user(user_id)
            .await?
            .ok_or(AuthError::UnknownPrincipal)?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "inactive account presented a valid token");
            return Err(AuthError::InactiveAccount.into());
        }

        Ok(Principal::from_user(&user))
    }
}
