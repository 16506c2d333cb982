//! Guard for user-management operations.
//!
//! User management is the most asymmetric part of the policy: Super Admins
//! do everything, Admins may create/read/delete Managers whose departments
//! sit inside their own scope, and Managers get nothing beyond reading
//! themselves.

use shepherd_core::errors::{AppError, DenyReason};
use shepherd_models::ids::DepartmentId;
use shepherd_models::roles::Role;
use shepherd_models::users::User;

use crate::authz::{Action, EntityKind, Resource, ScopeFilter, decide, visibility};
use crate::principal::Principal;

pub struct UserGuard;

impl UserGuard {
    /// May `principal` create an account with `role` assigned to
    /// `departments`?
    ///
    /// For an Admin creating a Manager the department set must be non-empty
    /// and a subset of the Admin's own; that failure is reported as a scope
    /// violation rather than a role failure so audit logs can tell "not
    /// allowed to" apart from "asked for the wrong departments".
    pub fn check_create(
        principal: &Principal,
        role: Role,
        departments: &[DepartmentId],
    ) -> Result<(), AppError> {
        if principal.role == Role::Admin && role == Role::Manager {
            let subset = !departments.is_empty()
                && departments.iter().all(|d| principal.departments.contains(d));
            if !subset {
                return Err(AppError::forbidden(DenyReason::DepartmentScopeViolation));
            }
        }
        let resource = Resource::in_departments(EntityKind::User, departments.iter().copied())
            .with_target_role(role);
        decide(principal, Action::Create, &resource).into_result()
    }

    /// May `principal` read `target`'s account?
    pub fn check_read(principal: &Principal, target: &User) -> Result<(), AppError> {
        decide(principal, Action::Read, &Self::descriptor(target)).into_result()
    }

    /// May `principal` update `target`? Root-only.
    pub fn check_update(principal: &Principal, target: &User) -> Result<(), AppError> {
        decide(principal, Action::Update, &Self::descriptor(target)).into_result()
    }

    pub fn check_delete(principal: &Principal, target: &User) -> Result<(), AppError> {
        decide(principal, Action::Delete, &Self::descriptor(target)).into_result()
    }

    /// May `principal` list accounts, and under which restriction?
    ///
    /// Super Admins see everyone. Admins see Managers inside their own
    /// departments, so the store gets both a scope filter and a role
    /// restriction. Managers are denied.
    pub fn check_list(
        principal: &Principal,
    ) -> Result<(ScopeFilter, Option<Role>), AppError> {
        if principal.role.is_super_admin() {
            return Ok((ScopeFilter::All, None));
        }
        let resource = Resource::entity(EntityKind::User).with_target_role(Role::Manager);
        decide(principal, Action::List, &resource).into_result()?;
        Ok((visibility(principal), Some(Role::Manager)))
    }

    fn descriptor(target: &User) -> Resource {
        Resource::in_departments(EntityKind::User, target.department_ids.iter().copied())
            .with_target_role(target.role)
            .with_owner(target.id)
    }
}
