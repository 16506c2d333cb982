//! Guard for department operations: reads are global, writes are root-only.

use shepherd_core::errors::AppError;

use crate::authz::{Action, EntityKind, Resource, decide};
use crate::principal::Principal;

pub struct DepartmentGuard;

impl DepartmentGuard {
    pub fn check_create(principal: &Principal) -> Result<(), AppError> {
        Self::check(principal, Action::Create)
    }

    pub fn check_read(principal: &Principal) -> Result<(), AppError> {
        Self::check(principal, Action::Read)
    }

    pub fn check_list(principal: &Principal) -> Result<(), AppError> {
        Self::check(principal, Action::List)
    }

    pub fn check_update(principal: &Principal) -> Result<(), AppError> {
        Self::check(principal, Action::Update)
    }

    pub fn check_delete(principal: &Principal) -> Result<(), AppError> {
        Self::check(principal, Action::Delete)
    }

    fn check(principal: &Principal, action: Action) -> Result<(), AppError> {
        decide(principal, action, &Resource::entity(EntityKind::Department)).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shepherd_models::ids::{DepartmentId, UserId};
    use shepherd_models::roles::Role;

    fn principal(role: Role) -> Principal {
        Principal {
            id: UserId::new(),
            role,
            departments: [DepartmentId::new()].into(),
        }
    }

    #[test]
    fn test_reads_open_writes_root_only() {
        for role in [Role::Admin, Role::Manager] {
            let p = principal(role);
            assert!(DepartmentGuard::check_read(&p).is_ok());
            assert!(DepartmentGuard::check_list(&p).is_ok());
            assert!(DepartmentGuard::check_create(&p).is_err());
            assert!(DepartmentGuard::check_update(&p).is_err());
            assert!(DepartmentGuard::check_delete(&p).is_err());
        }

        let root = principal(Role::SuperAdmin);
        assert!(DepartmentGuard::check_create(&root).is_ok());
        assert!(DepartmentGuard::check_delete(&root).is_ok());
    }
}
