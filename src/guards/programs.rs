//! Guard for program operations.
//!
//! Programs follow the standard department scoping. There is no delete:
//! archiving is an update so historical attendance stays attributable, and
//! the engine treats it as such.

use shepherd_core::errors::AppError;
use shepherd_models::ids::DepartmentId;
use shepherd_models::programs::Program;

use crate::authz::{Action, EntityKind, Resource, decide};
use crate::principal::Principal;

pub struct ProgramGuard;

impl ProgramGuard {
    pub fn check_create(
        principal: &Principal,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::Create, department_id)
    }

    pub fn check_read(principal: &Principal, program: &Program) -> Result<(), AppError> {
        Self::check(principal, Action::Read, program.department_id)
    }

    pub fn check_update(principal: &Principal, program: &Program) -> Result<(), AppError> {
        Self::check(principal, Action::Update, program.department_id)
    }

    /// Archiving is an update, not a delete.
    pub fn check_archive(principal: &Principal, program: &Program) -> Result<(), AppError> {
        Self::check(principal, Action::Update, program.department_id)
    }

    /// Program listings are always anchored to one department.
    pub fn check_list(
        principal: &Principal,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::List, department_id)
    }

    fn check(
        principal: &Principal,
        action: Action,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        decide(
            principal,
            action,
            &Resource::in_department(EntityKind::Program, department_id),
        )
        .into_result()
    }
}
