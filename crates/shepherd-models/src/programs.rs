//! Program models and DTOs.
//!
//! A program is a recurring class or a one-off event inside a department.
//! Programs are archived (soft-deleted) rather than removed so historical
//! attendance stays attributable.

use crate::ids::{DepartmentId, ProgramId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramKind {
    Regular,
    Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub department_id: DepartmentId,
    pub kind: ProgramKind,
    pub description: Option<String>,
    /// Cleared when the program is archived.
    pub is_active: bool,
    pub created_by: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProgramDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub department_id: DepartmentId,
    pub kind: ProgramKind,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProgramDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub kind: Option<ProgramKind>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}
