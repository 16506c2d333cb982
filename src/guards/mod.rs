//! Per-entity resource guards.
//!
//! Guards are the only place resource descriptors get built: they know which
//! departments anchor a decision for each operation (a student move needs
//! the old *and* new department, attendance collection is anchored to the
//! session's department, and so on). Services call a guard before touching
//! the store; the guard calls [`crate::authz::decide`].
//!
//! Guards are pure policy: they never query the store. Existence checks and
//! uniqueness live in the services, after the guard has allowed the action.

pub mod attendance;
pub mod departments;
pub mod programs;
pub mod students;
pub mod users;

pub use attendance::AttendanceGuard;
pub use departments::DepartmentGuard;
pub use programs::ProgramGuard;
pub use students::StudentGuard;
pub use users::UserGuard;
