//! User data models and DTOs.
//!
//! A [`User`] is a persisted account. Department assignments are only
//! meaningful for Admin and Manager roles; a SuperAdmin's set is kept empty
//! and ignored everywhere.

use crate::ids::{DepartmentId, UserId};
use crate::roles::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// A persisted account.
///
/// The password hash never leaves the process: it is skipped during
/// serialization so a `User` can be returned from an endpoint as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    /// Departments this user is assigned to. Always empty for SuperAdmin.
    pub department_ids: BTreeSet<DepartmentId>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    /// Whether this account may act on the given department at all.
    pub fn is_assigned_to(&self, department_id: DepartmentId) -> bool {
        self.role.is_super_admin() || self.department_ids.contains(&department_id)
    }
}

/// DTO for creating a new user.
///
/// Used by SuperAdmins (any role) and by Admins (Managers only; the guard
/// enforces the department subset rule).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub role: Role,
    /// Departments to assign. Required non-empty for Admin and Manager.
    #[serde(default)]
    pub department_ids: Vec<DepartmentId>,
}

/// DTO for updating an existing user. SuperAdmin only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserDto {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// Replaces the full assignment set when present.
    pub department_ids: Option<Vec<DepartmentId>>,
}

/// Response shape for token issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Credentials for login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
