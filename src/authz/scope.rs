//! Visibility predicate for list operations.

use shepherd_models::ids::DepartmentId;
use std::collections::BTreeSet;

/// Filter restricting list/query results to the caller's scope.
///
/// Stores must apply this *below* pagination so a page is cut from the
/// visible rows, never the other way around. The bundled in-memory store
/// filters while scanning its maps before applying offset/limit, the
/// small-dataset relaxation; a SQL implementation would push the filter
/// into the `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    /// No restriction: every row is visible (Super Admin).
    All,
    /// Only rows in one of these departments are visible. An empty set
    /// matches nothing.
    Departments(BTreeSet<DepartmentId>),
}

impl ScopeFilter {
    /// Whether a row in the given department passes the filter.
    pub fn contains(&self, department_id: DepartmentId) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Departments(set) => set.contains(&department_id),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ScopeFilter::All)
    }
}
