//! The decision engine: an ordered rule table with default-deny fallthrough.
//!
//! Every decision is a pure function of a [`Principal`] snapshot and a
//! [`Resource`] descriptor. Rules are small named functions evaluated
//! top-down; the first one with an opinion wins, and anything unmatched is
//! denied. Keeping the table flat makes the precedence order auditable and
//! lets each rule be tested in isolation.

use crate::authz::scope::ScopeFilter;
use crate::principal::Principal;
use shepherd_core::errors::{AppError, DenyReason};
use shepherd_models::ids::{DepartmentId, UserId};
use shepherd_models::roles::Role;

/// The verbs the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Action::Create | Action::Update | Action::Delete)
    }
}

/// Entity kinds the engine can decide over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Department,
    Student,
    Program,
    AttendanceSession,
}

impl EntityKind {
    /// Kinds whose rows live inside a department and are subject to the
    /// caller's assignment set.
    fn is_department_scoped(&self) -> bool {
        matches!(
            self,
            EntityKind::Student | EntityKind::Program | EntityKind::AttendanceSession
        )
    }
}

/// A typed descriptor of the thing being acted on.
///
/// Guards build these from request payloads (create) or persisted rows
/// (read/update/delete). `departments` lists every department the decision
/// must hold for (a student move lists both the old and the new one).
#[derive(Debug, Clone)]
pub struct Resource {
    pub kind: EntityKind,
    pub departments: Vec<DepartmentId>,
    /// For User targets: the role of the account being acted on.
    pub target_role: Option<Role>,
    /// For User targets: the id of the account being acted on.
    pub owner: Option<UserId>,
}

impl Resource {
    pub fn entity(kind: EntityKind) -> Self {
        Self {
            kind,
            departments: Vec::new(),
            target_role: None,
            owner: None,
        }
    }

    pub fn in_department(kind: EntityKind, department_id: DepartmentId) -> Self {
        Self {
            kind,
            departments: vec![department_id],
            target_role: None,
            owner: None,
        }
    }

    pub fn in_departments(
        kind: EntityKind,
        departments: impl IntoIterator<Item = DepartmentId>,
    ) -> Self {
        Self {
            kind,
            departments: departments.into_iter().collect(),
            target_role: None,
            owner: None,
        }
    }

    pub fn with_target_role(mut self, role: Role) -> Self {
        self.target_role = Some(role);
        self
    }

    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// The outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Converts the decision into a service-layer result.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AppError::forbidden(reason)),
        }
    }
}

/// A single rule: `None` means "no opinion, keep walking the table".
type Rule = fn(&Principal, Action, &Resource) -> Option<Decision>;

/// The rule table, in precedence order. First match wins.
const RULES: &[(&str, Rule)] = &[
    ("super_admin_allows_all", super_admin_allows_all),
    ("self_read", self_read),
    ("departments_globally_readable", departments_globally_readable),
    ("department_writes_are_root_only", department_writes_are_root_only),
    ("admin_manages_scoped_managers", admin_manages_scoped_managers),
    ("user_management_denied", user_management_denied),
    ("scoped_delete_is_root_only", scoped_delete_is_root_only),
    ("scoped_entity_in_scope", scoped_entity_in_scope),
    ("scoped_entity_out_of_scope", scoped_entity_out_of_scope),
];

/// Decide whether `principal` may perform `action` on `resource`.
pub fn decide(principal: &Principal, action: Action, resource: &Resource) -> Decision {
    for (name, rule) in RULES {
        if let Some(decision) = rule(principal, action, resource) {
            tracing::trace!(
                rule = name,
                principal = %principal.id,
                role = %principal.role,
                ?action,
                kind = ?resource.kind,
                ?decision,
                "authorization decision"
            );
            return decision;
        }
    }
    // Default-deny fallthrough for anything the table has no opinion on.
    Decision::Deny(DenyReason::InsufficientRole)
}

/// The visibility predicate for `List` actions.
pub fn visibility(principal: &Principal) -> ScopeFilter {
    if principal.role.is_super_admin() {
        ScopeFilter::All
    } else {
        ScopeFilter::Departments(principal.departments.clone())
    }
}

// --- rules, in table order ---

fn super_admin_allows_all(p: &Principal, _a: Action, _r: &Resource) -> Option<Decision> {
    p.role.is_super_admin().then_some(Decision::Allow)
}

/// Any authenticated account may read itself (`/me`).
fn self_read(p: &Principal, a: Action, r: &Resource) -> Option<Decision> {
    (r.kind == EntityKind::User && a == Action::Read && r.owner == Some(p.id))
        .then_some(Decision::Allow)
}

/// Departments are globally visible metadata.
fn departments_globally_readable(_p: &Principal, a: Action, r: &Resource) -> Option<Decision> {
    (r.kind == EntityKind::Department && matches!(a, Action::Read | Action::List))
        .then_some(Decision::Allow)
}

fn department_writes_are_root_only(_p: &Principal, _a: Action, r: &Resource) -> Option<Decision> {
    // Reads were allowed above; everything else on departments is root-only
    // and the root case already matched rule one.
    (r.kind == EntityKind::Department).then_some(Decision::Deny(DenyReason::InsufficientRole))
}

/// Admins manage Manager accounts whose departments sit inside their own
/// scope. Create, read, delete, and list only: generic user updates stay
/// root-only.
fn admin_manages_scoped_managers(p: &Principal, a: Action, r: &Resource) -> Option<Decision> {
    if p.role != Role::Admin || r.kind != EntityKind::User {
        return None;
    }
    if r.target_role != Some(Role::Manager) {
        return None;
    }
    if !matches!(a, Action::Create | Action::Read | Action::Delete | Action::List) {
        return None;
    }
    let subset = r.departments.iter().all(|d| p.departments.contains(d));
    let anchored = a == Action::List || !r.departments.is_empty();
    (subset && anchored && !p.departments.is_empty()).then_some(Decision::Allow)
}

/// Everything else on User targets is denied: Managers never touch user
/// records, Admins never touch Admins or Super Admins.
fn user_management_denied(_p: &Principal, _a: Action, r: &Resource) -> Option<Decision> {
    (r.kind == EntityKind::User).then_some(Decision::Deny(DenyReason::InsufficientRole))
}

/// Deleting scoped rows is root-only regardless of department match.
fn scoped_delete_is_root_only(_p: &Principal, a: Action, r: &Resource) -> Option<Decision> {
    (r.kind.is_department_scoped() && a == Action::Delete)
        .then_some(Decision::Deny(DenyReason::InsufficientRole))
}

fn scoped_entity_in_scope(p: &Principal, a: Action, r: &Resource) -> Option<Decision> {
    if !r.kind.is_department_scoped() || !p.role.is_department_scoped() {
        return None;
    }
    // An empty assignment set denies every scoped action outright; it must
    // never degrade into allow-with-empty-result.
    if p.departments.is_empty() {
        return None;
    }
    let in_scope = r.departments.iter().all(|d| p.departments.contains(d));
    // Targeted actions need at least one department to anchor the decision;
    // List may be unanchored because the visibility filter restricts it.
    let anchored = a == Action::List || !r.departments.is_empty();
    (in_scope && anchored).then_some(Decision::Allow)
}

fn scoped_entity_out_of_scope(_p: &Principal, _a: Action, r: &Resource) -> Option<Decision> {
    r.kind
        .is_department_scoped()
        .then_some(Decision::Deny(DenyReason::OutOfScope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn principal(role: Role, departments: &[DepartmentId]) -> Principal {
        Principal {
            id: UserId::new(),
            role,
            departments: departments.iter().copied().collect(),
        }
    }

    #[test]
    fn test_super_admin_allows_everything() {
        let root = principal(Role::SuperAdmin, &[]);
        let foreign = DepartmentId::new();

        for action in [
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::List,
        ] {
            for kind in [
                EntityKind::User,
                EntityKind::Department,
                EntityKind::Student,
                EntityKind::Program,
                EntityKind::AttendanceSession,
            ] {
                let resource = Resource::in_department(kind, foreign);
                assert_eq!(
                    decide(&root, action, &resource),
                    Decision::Allow,
                    "{action:?} on {kind:?}"
                );
            }
        }
    }

    #[test]
    fn test_self_read_allowed_for_everyone() {
        let manager = principal(Role::Manager, &[DepartmentId::new()]);
        let own = Resource::entity(EntityKind::User).with_owner(manager.id);
        assert_eq!(decide(&manager, Action::Read, &own), Decision::Allow);

        // Reading someone else is still denied
        let other = Resource::entity(EntityKind::User).with_owner(UserId::new());
        assert_eq!(
            decide(&manager, Action::Read, &other),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_departments_readable_but_not_writable() {
        let manager = principal(Role::Manager, &[DepartmentId::new()]);
        let dept = Resource::entity(EntityKind::Department);

        assert_eq!(decide(&manager, Action::Read, &dept), Decision::Allow);
        assert_eq!(decide(&manager, Action::List, &dept), Decision::Allow);
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(
                decide(&manager, action, &dept),
                Decision::Deny(DenyReason::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_admin_creates_manager_in_scope() {
        let dept = DepartmentId::new();
        let admin = principal(Role::Admin, &[dept]);

        let manager_in_scope = Resource::in_department(EntityKind::User, dept)
            .with_target_role(Role::Manager);
        assert_eq!(
            decide(&admin, Action::Create, &manager_in_scope),
            Decision::Allow
        );

        let manager_out_of_scope =
            Resource::in_department(EntityKind::User, DepartmentId::new())
                .with_target_role(Role::Manager);
        assert_eq!(
            decide(&admin, Action::Create, &manager_out_of_scope),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_admin_cannot_manage_admins_or_root() {
        let dept = DepartmentId::new();
        let admin = principal(Role::Admin, &[dept]);

        for target in [Role::Admin, Role::SuperAdmin] {
            let resource =
                Resource::in_department(EntityKind::User, dept).with_target_role(target);
            assert_eq!(
                decide(&admin, Action::Create, &resource),
                Decision::Deny(DenyReason::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_admin_cannot_update_managers() {
        let dept = DepartmentId::new();
        let admin = principal(Role::Admin, &[dept]);
        let manager = Resource::in_department(EntityKind::User, dept)
            .with_target_role(Role::Manager);
        assert_eq!(
            decide(&admin, Action::Update, &manager),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_manager_never_mutates_users() {
        let dept = DepartmentId::new();
        let manager = principal(Role::Manager, &[dept]);

        // Even a Manager target in the same department is off limits.
        let target =
            Resource::in_department(EntityKind::User, dept).with_target_role(Role::Manager);
        for action in [Action::Create, Action::Update, Action::Delete, Action::List] {
            assert_eq!(
                decide(&manager, action, &target),
                Decision::Deny(DenyReason::InsufficientRole),
                "{action:?}"
            );
        }
    }

    #[test]
    fn test_student_actions_scoped() {
        let dept = DepartmentId::new();
        let other = DepartmentId::new();

        for role in [Role::Admin, Role::Manager] {
            let p = principal(role, &[dept]);

            let in_scope = Resource::in_department(EntityKind::Student, dept);
            for action in [Action::Create, Action::Read, Action::Update] {
                assert_eq!(decide(&p, action, &in_scope), Decision::Allow, "{role:?}");
            }

            let out_of_scope = Resource::in_department(EntityKind::Student, other);
            for action in [Action::Create, Action::Read, Action::Update] {
                assert_eq!(
                    decide(&p, action, &out_of_scope),
                    Decision::Deny(DenyReason::OutOfScope),
                    "{role:?}"
                );
            }
        }
    }

    #[test]
    fn test_student_delete_is_root_only() {
        let dept = DepartmentId::new();
        let in_scope = Resource::in_department(EntityKind::Student, dept);

        // Department match is irrelevant: delete is never scoped.
        for role in [Role::Admin, Role::Manager] {
            let p = principal(role, &[dept]);
            assert_eq!(
                decide(&p, Action::Delete, &in_scope),
                Decision::Deny(DenyReason::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_student_move_requires_both_departments() {
        let old_dept = DepartmentId::new();
        let new_dept = DepartmentId::new();
        let admin_with_both = principal(Role::Admin, &[old_dept, new_dept]);
        let admin_with_old = principal(Role::Admin, &[old_dept]);

        let move_descriptor =
            Resource::in_departments(EntityKind::Student, [old_dept, new_dept]);
        assert_eq!(
            decide(&admin_with_both, Action::Update, &move_descriptor),
            Decision::Allow
        );
        assert_eq!(
            decide(&admin_with_old, Action::Update, &move_descriptor),
            Decision::Deny(DenyReason::OutOfScope)
        );
    }

    #[test]
    fn test_empty_assignment_set_denies_scoped_actions() {
        for role in [Role::Admin, Role::Manager] {
            let p = principal(role, &[]);
            let resource = Resource::in_department(EntityKind::Student, DepartmentId::new());
            for action in [Action::Create, Action::Read, Action::Update, Action::List] {
                assert!(
                    !decide(&p, action, &resource).is_allow(),
                    "{role:?} {action:?}"
                );
            }
            // Unanchored list is denied too, not allowed-with-empty-result.
            let list = Resource::entity(EntityKind::Student);
            assert!(!decide(&p, Action::List, &list).is_allow());
        }
    }

    #[test]
    fn test_visibility_filter() {
        let dept = DepartmentId::new();

        let root = principal(Role::SuperAdmin, &[]);
        assert_eq!(visibility(&root), ScopeFilter::All);

        let admin = principal(Role::Admin, &[dept]);
        assert_eq!(
            visibility(&admin),
            ScopeFilter::Departments(BTreeSet::from([dept]))
        );

        let unassigned = principal(Role::Manager, &[]);
        assert_eq!(
            visibility(&unassigned),
            ScopeFilter::Departments(BTreeSet::new())
        );
    }

    #[test]
    fn test_programs_and_sessions_follow_student_scoping() {
        let dept = DepartmentId::new();
        let manager = principal(Role::Manager, &[dept]);

        for kind in [EntityKind::Program, EntityKind::AttendanceSession] {
            let in_scope = Resource::in_department(kind, dept);
            assert_eq!(decide(&manager, Action::Create, &in_scope), Decision::Allow);
            assert_eq!(
                decide(&manager, Action::Delete, &in_scope),
                Decision::Deny(DenyReason::InsufficientRole)
            );

            let out = Resource::in_department(kind, DepartmentId::new());
            assert_eq!(
                decide(&manager, Action::Read, &out),
                Decision::Deny(DenyReason::OutOfScope)
            );
        }
    }
}
