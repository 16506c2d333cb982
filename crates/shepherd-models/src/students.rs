//! Student models and DTOs.
//!
//! Every student belongs to exactly one department; that single foreign key
//! is what the whole scoping model pivots on. The age-category profile is a
//! free-form JSON document because each category records different fields
//! (guardian contacts for children, education/occupation for adults).

use crate::ids::{DepartmentId, StudentId, UserId};
use serde::{Deserialize, Serialize};
use shepherd_core::pagination::PaginationParams;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

/// Age bracket a student is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentCategory {
    Children,
    Adolescent,
    Youth,
    Adult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub sex: Gender,
    pub church: Option<String>,
    pub category: StudentCategory,
    /// Category-specific profile fields, kept schemaless.
    pub profile: Option<serde_json::Value>,
    pub department_id: DepartmentId,
    pub created_by: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: i32,
    pub sex: Gender,
    pub church: Option<String>,
    pub category: StudentCategory,
    pub profile: Option<serde_json::Value>,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<i32>,
    pub sex: Option<Gender>,
    pub church: Option<String>,
    pub category: Option<StudentCategory>,
    pub profile: Option<serde_json::Value>,
    /// Moving a student requires scope on both the old and new department.
    pub department_id: Option<DepartmentId>,
}

/// Query parameters for listing students.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilterParams {
    /// Restrict to a single department (must be inside the caller's scope).
    pub department_id: Option<DepartmentId>,
    pub category: Option<StudentCategory>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing students.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: shepherd_core::pagination::PaginationMeta,
}
