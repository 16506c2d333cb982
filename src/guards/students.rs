//! Guard for student operations.
//!
//! Students carry exactly one department foreign key; every decision is
//! anchored to it. The one subtlety is a move between departments, which is
//! a single decision over both the old and the new department so a caller
//! can never half-complete a move they are only half-scoped for.

use shepherd_core::errors::AppError;
use shepherd_models::ids::DepartmentId;
use shepherd_models::students::Student;

use crate::authz::{Action, EntityKind, Resource, ScopeFilter, decide, visibility};
use crate::principal::Principal;

pub struct StudentGuard;

impl StudentGuard {
    pub fn check_create(
        principal: &Principal,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        decide(
            principal,
            Action::Create,
            &Resource::in_department(EntityKind::Student, department_id),
        )
        .into_result()
    }

    pub fn check_read(principal: &Principal, student: &Student) -> Result<(), AppError> {
        decide(
            principal,
            Action::Read,
            &Resource::in_department(EntityKind::Student, student.department_id),
        )
        .into_result()
    }

    /// May `principal` update `student`, possibly moving it to
    /// `new_department`? A move anchors the decision to both departments.
    pub fn check_update(
        principal: &Principal,
        student: &Student,
        new_department: Option<DepartmentId>,
    ) -> Result<(), AppError> {
        let mut departments = vec![student.department_id];
        if let Some(dept) = new_department
            && dept != student.department_id
        {
            departments.push(dept);
        }
        decide(
            principal,
            Action::Update,
            &Resource::in_departments(EntityKind::Student, departments),
        )
        .into_result()
    }

    /// Root-only, regardless of scope.
    pub fn check_delete(principal: &Principal, student: &Student) -> Result<(), AppError> {
        decide(
            principal,
            Action::Delete,
            &Resource::in_department(EntityKind::Student, student.department_id),
        )
        .into_result()
    }

    /// May `principal` list students, optionally narrowed to one requested
    /// department? Returns the visibility filter to hand the store.
    pub fn check_list(
        principal: &Principal,
        requested: Option<DepartmentId>,
    ) -> Result<ScopeFilter, AppError> {
        let resource = match requested {
            Some(dept) => Resource::in_department(EntityKind::Student, dept),
            None => Resource::entity(EntityKind::Student),
        };
        decide(principal, Action::List, &resource).into_result()?;
        Ok(visibility(principal))
    }
}
