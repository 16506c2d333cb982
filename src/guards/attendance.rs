//! Guard for attendance sessions and collection.
//!
//! Everything is anchored to the session's department. Collecting records is
//! an update to the session, so the same scope rule covers creating the
//! session and filling in its roster.

use shepherd_core::errors::AppError;
use shepherd_models::attendance::AttendanceSession;
use shepherd_models::ids::DepartmentId;

use crate::authz::{Action, EntityKind, Resource, ScopeFilter, decide, visibility};
use crate::principal::Principal;

pub struct AttendanceGuard;

impl AttendanceGuard {
    pub fn check_create(
        principal: &Principal,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::Create, department_id)
    }

    pub fn check_read(
        principal: &Principal,
        session: &AttendanceSession,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::Read, session.department_id)
    }

    /// Collection rewrites the session's records; it is an update on the
    /// session.
    pub fn check_collect(
        principal: &Principal,
        session: &AttendanceSession,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::Update, session.department_id)
    }

    pub fn check_delete(
        principal: &Principal,
        session: &AttendanceSession,
    ) -> Result<(), AppError> {
        Self::check(principal, Action::Delete, session.department_id)
    }

    /// May `principal` list sessions, optionally narrowed to one requested
    /// department? Returns the visibility filter to hand the store.
    pub fn check_list(
        principal: &Principal,
        requested: Option<DepartmentId>,
    ) -> Result<ScopeFilter, AppError> {
        let resource = match requested {
            Some(dept) => Resource::in_department(EntityKind::AttendanceSession, dept),
            None => Resource::entity(EntityKind::AttendanceSession),
        };
        decide(principal, Action::List, &resource).into_result()?;
        Ok(visibility(principal))
    }

    fn check(
        principal: &Principal,
        action: Action,
        department_id: DepartmentId,
    ) -> Result<(), AppError> {
        decide(
            principal,
            action,
            &Resource::in_department(EntityKind::AttendanceSession, department_id),
        )
        .into_result()
    }
}
