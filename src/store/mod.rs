//! Persistence traits and the bundled in-memory store.
//!
//! Services are generic over these traits; they are the seam where a real
//! database plugs in. Each trait covers one entity family. List methods take
//! the caller's [`ScopeFilter`](crate::authz::ScopeFilter) and apply it
//! *before* pagination, so the returned page and total are cut from the
//! visible rows only.
//!
//! Method names are unique across traits so one type can implement all of
//! them without disambiguation at call sites.

use shepherd_core::errors::AppError;
use shepherd_core::pagination::PaginationParams;
use shepherd_models::attendance::{AttendanceRecord, AttendanceSession, SessionFilterParams};
use shepherd_models::departments::Department;
use shepherd_models::ids::{DepartmentId, ProgramId, SessionId, StudentId, UserId};
use shepherd_models::programs::Program;
use shepherd_models::roles::Role;
use shepherd_models::students::{Student, StudentCategory};
use shepherd_models::users::User;

use crate::authz::ScopeFilter;

mod memory;

pub use memory::InMemoryStore;

/// Account persistence.
pub trait UserStore: Send + Sync {
    fn find_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Lists users visible under `filter`, optionally restricted to one
    /// role, with the page cut after filtering. Returns the page and the
    /// post-filter total.
    fn list_users(
        &self,
        filter: &ScopeFilter,
        role: Option<Role>,
        pagination: &PaginationParams,
    ) -> impl Future<Output = Result<(Vec<User>, i64), AppError>> + Send;

    /// Fails with `Conflict` when the email is already taken.
    fn insert_user(&self, user: User) -> impl Future<Output = Result<User, AppError>> + Send;

    fn update_user(&self, user: User) -> impl Future<Output = Result<User, AppError>> + Send;

    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Number of accounts assigned to a department.
    fn count_users_assigned(
        &self,
        department_id: DepartmentId,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Department persistence.
pub trait DepartmentStore: Send + Sync {
    fn find_department(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, AppError>> + Send;

    fn find_department_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Department>, AppError>> + Send;

    fn list_departments(
        &self,
        pagination: &PaginationParams,
    ) -> impl Future<Output = Result<(Vec<Department>, i64), AppError>> + Send;

    /// Fails with `Conflict` when the name is already taken.
    fn insert_department(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, AppError>> + Send;

    fn update_department(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, AppError>> + Send;

    fn delete_department(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Student persistence.
pub trait StudentStore: Send + Sync {
    fn find_student(
        &self,
        id: StudentId,
    ) -> impl Future<Output = Result<Option<Student>, AppError>> + Send;

    fn list_students(
        &self,
        filter: &ScopeFilter,
        department_id: Option<DepartmentId>,
        category: Option<StudentCategory>,
        pagination: &PaginationParams,
    ) -> impl Future<Output = Result<(Vec<Student>, i64), AppError>> + Send;

    fn insert_student(
        &self,
        student: Student,
    ) -> impl Future<Output = Result<Student, AppError>> + Send;

    fn update_student(
        &self,
        student: Student,
    ) -> impl Future<Output = Result<Student, AppError>> + Send;

    fn delete_student(&self, id: StudentId)
    -> impl Future<Output = Result<(), AppError>> + Send;

    fn count_students_in_department(
        &self,
        department_id: DepartmentId,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Program persistence.
pub trait ProgramStore: Send + Sync {
    fn find_program(
        &self,
        id: ProgramId,
    ) -> impl Future<Output = Result<Option<Program>, AppError>> + Send;

    /// Programs of one department; archived rows are excluded unless
    /// `include_archived`.
    fn list_programs(
        &self,
        department_id: DepartmentId,
        include_archived: bool,
    ) -> impl Future<Output = Result<Vec<Program>, AppError>> + Send;

    fn insert_program(
        &self,
        program: Program,
    ) -> impl Future<Output = Result<Program, AppError>> + Send;

    fn update_program(
        &self,
        program: Program,
    ) -> impl Future<Output = Result<Program, AppError>> + Send;

    fn count_programs_in_department(
        &self,
        department_id: DepartmentId,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Attendance persistence.
pub trait AttendanceStore: Send + Sync {
    fn find_session(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<AttendanceSession>, AppError>> + Send;

    fn list_sessions(
        &self,
        filter: &ScopeFilter,
        params: &SessionFilterParams,
    ) -> impl Future<Output = Result<Vec<AttendanceSession>, AppError>> + Send;

    fn insert_session(
        &self,
        session: AttendanceSession,
    ) -> impl Future<Output = Result<AttendanceSession, AppError>> + Send;

    fn delete_session(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Replaces the full record set of a session (idempotent collection).
    fn replace_records(
        &self,
        session_id: SessionId,
        records: Vec<AttendanceRecord>,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, AppError>> + Send;

    fn records_for_session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, AppError>> + Send;

    fn count_sessions_in_department(
        &self,
        department_id: DepartmentId,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}
