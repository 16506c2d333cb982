//! In-memory reference store.
//!
//! A single mutex over plain `BTreeMap`s. Good enough for tests and for the
//! small deployments this started life in; the trait seam is where a SQL
//! store replaces it. Uniqueness checks (user email, department name) are
//! done under the same lock as the insert, so they are race-free here
//! without needing database constraints.

use std::collections::BTreeMap;
use std::sync::Mutex;

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

use super::{AttendanceStore, DepartmentStore, ProgramStore, StudentStore, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    departments: BTreeMap<DepartmentId, Department>,
    students: BTreeMap<StudentId, Student>,
    programs: BTreeMap<ProgramId, Program>,
    sessions: BTreeMap<SessionId, AttendanceSession>,
    records: BTreeMap<SessionId, Vec<AttendanceRecord>>,
}

/// The bundled store. Cheap to create per test; share via reference.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens after a panic in another test thread;
        // recover the data rather than cascading the panic.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A user row is visible when its full assignment set sits inside the
/// filter, matching the read-path rule: a row the caller could not fetch by
/// id must not surface in a listing either. Unassigned rows (Super Admins)
/// are only visible without restriction.
fn user_visible(user: &User, filter: &ScopeFilter) -> bool {
    match filter {
        ScopeFilter::All => true,
        ScopeFilter::Departments(set) => {
            !user.department_ids.is_empty()
                && user.department_ids.iter().all(|d| set.contains(d))
        }
    }
}

fn paginate<T: Clone>(rows: Vec<T>, pagination: &PaginationParams) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let page = rows
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();
    (page, total)
}

impl UserStore for InMemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users(
        &self,
        filter: &ScopeFilter,
        role: Option<Role>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        let inner = self.lock();
        let mut rows: Vec<User> = inner
            .users
            .values()
            .filter(|u| user_visible(u, filter))
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, pagination))
    }

    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let mut inner = self.lock();
        if inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::conflict("Email already registered"));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, AppError> {
        let mut inner = self.lock();
        if inner
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::conflict("Email already registered"));
        }
        if !inner.users.contains_key(&user.id) {
            return Err(AppError::not_found("User not found"));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), AppError> {
        self.lock()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn count_users_assigned(
        &self,
        department_id: DepartmentId,
    ) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .filter(|u| u.department_ids.contains(&department_id))
            .count() as i64)
    }
}

impl DepartmentStore for InMemoryStore {
    async fn find_department(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, AppError> {
        Ok(self.lock().departments.get(&id).cloned())
    }

    async fn find_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, AppError> {
        Ok(self
            .lock()
            .departments
            .values()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list_departments(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Department>, i64), AppError> {
        let inner = self.lock();
        let mut rows: Vec<Department> = inner.departments.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, pagination))
    }

    async fn insert_department(
        &self,
        department: Department,
    ) -> Result<Department, AppError> {
        let mut inner = self.lock();
        if inner
            .departments
            .values()
            .any(|d| d.name.eq_ignore_ascii_case(&department.name))
        {
            return Err(AppError::conflict("Department name already in use"));
        }
        inner.departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn update_department(
        &self,
        department: Department,
    ) -> Result<Department, AppError> {
        let mut inner = self.lock();
        if inner
            .departments
            .values()
            .any(|d| d.id != department.id && d.name.eq_ignore_ascii_case(&department.name))
        {
            return Err(AppError::conflict("Department name already in use"));
        }
        if !inner.departments.contains_key(&department.id) {
            return Err(AppError::not_found("Department not found"));
        }
        inner.departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<(), AppError> {
        self.lock()
            .departments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Department not found"))
    }
}

impl StudentStore for InMemoryStore {
    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        Ok(self.lock().students.get(&id).cloned())
    }

    async fn list_students(
        &self,
        filter: &ScopeFilter,
        department_id: Option<DepartmentId>,
        category: Option<StudentCategory>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let inner = self.lock();
        // Visibility first, then the request's own filters, then the page.
        let mut rows: Vec<Student> = inner
            .students
            .values()
            .filter(|s| filter.contains(s.department_id))
            .filter(|s| department_id.is_none_or(|d| s.department_id == d))
            .filter(|s| category.is_none_or(|c| s.category == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, pagination))
    }

    async fn insert_student(&self, student: Student) -> Result<Student, AppError> {
        self.lock().students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update_student(&self, student: Student) -> Result<Student, AppError> {
        let mut inner = self.lock();
        if !inner.students.contains_key(&student.id) {
            return Err(AppError::not_found("Student not found"));
        }
        inner.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), AppError> {
        self.lock()
            .students
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Student not found"))
    }

    async fn count_students_in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .students
            .values()
            .filter(|s| s.department_id == department_id)
            .count() as i64)
    }
}

impl ProgramStore for InMemoryStore {
    async fn find_program(&self, id: ProgramId) -> Result<Option<Program>, AppError> {
        Ok(self.lock().programs.get(&id).cloned())
    }

    async fn list_programs(
        &self,
        department_id: DepartmentId,
        include_archived: bool,
    ) -> Result<Vec<Program>, AppError> {
        let inner = self.lock();
        let mut rows: Vec<Program> = inner
            .programs
            .values()
            .filter(|p| p.department_id == department_id)
            .filter(|p| include_archived || p.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert_program(&self, program: Program) -> Result<Program, AppError> {
        self.lock().programs.insert(program.id, program.clone());
        Ok(program)
    }

    async fn update_program(&self, program: Program) -> Result<Program, AppError> {
        let mut inner = self.lock();
        if !inner.programs.contains_key(&program.id) {
            return Err(AppError::not_found("Program not found"));
        }
        inner.programs.insert(program.id, program.clone());
        Ok(program)
    }

    async fn count_programs_in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .programs
            .values()
            .filter(|p| p.department_id == department_id)
            .count() as i64)
    }
}

impl AttendanceStore for InMemoryStore {
    async fn find_session(
        &self,
        id: SessionId,
    ) -> Result<Option<AttendanceSession>, AppError> {
        Ok(self.lock().sessions.get(&id).cloned())
    }

    async fn list_sessions(
        &self,
        filter: &ScopeFilter,
        params: &SessionFilterParams,
    ) -> Result<Vec<AttendanceSession>, AppError> {
        let inner = self.lock();
        let mut rows: Vec<AttendanceSession> = inner
            .sessions
            .values()
            .filter(|s| filter.contains(s.department_id))
            .filter(|s| params.department_id.is_none_or(|d| s.department_id == d))
            .filter(|s| params.category.is_none_or(|c| s.target_category == c))
            .filter(|s| params.program_id.is_none_or(|p| s.program_id == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn insert_session(
        &self,
        session: AttendanceSession,
    ) -> Result<AttendanceSession, AppError> {
        self.lock().sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn delete_session(&self, id: SessionId) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.records.remove(&id);
        inner
            .sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Attendance session not found"))
    }

    async fn replace_records(
        &self,
        session_id: SessionId,
        records: Vec<AttendanceRecord>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let mut inner = self.lock();
        if !inner.sessions.contains_key(&session_id) {
            return Err(AppError::not_found("Attendance session not found"));
        }
        inner.records.insert(session_id, records.clone());
        Ok(records)
    }

    async fn records_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self
            .lock()
            .records
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn count_sessions_in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .sessions
            .values()
            .filter(|s| s.department_id == department_id)
            .count() as i64)
    }
}
