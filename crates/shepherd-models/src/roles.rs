//! The closed role model.
//!
//! Exactly three roles exist and they do not compose: a user holds one role.
//! Scope comes from department assignments, never from the role itself; two
//! Admins with different assignment sets have different effective authority
//! even though their role is identical.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Global access; department assignments are ignored (implicitly all).
    SuperAdmin,
    /// Department-scoped management, may create Managers in scope.
    Admin,
    /// Department-scoped day-to-day work, no user management.
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Roles whose department assignments are meaningful.
    pub fn is_department_scoped(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// Get the hierarchy level of a role (higher number = more privileges).
///
/// Used only for display/sorting. Authorization decisions go through the
/// rule table, not through level comparisons.
pub fn role_hierarchy_level(role: &Role) -> u8 {
    match role {
        Role::SuperAdmin => 2,
        Role::Admin => 1,
        Role::Manager => 0,
    }
}
