//! # Shepherd Models
//!
//! Domain models and DTOs for the Shepherd API.
//!
//! This crate provides all data structures used throughout the Shepherd
//! application: persisted entities, request DTOs with validation rules, and
//! the strongly-typed id newtypes.
//!
//! # Modules
//!
//! - [`ids`]: Typed id newtypes over `Uuid`
//! - [`roles`]: The closed three-role model
//! - [`users`]: Accounts and user-management DTOs
//! - [`departments`]: Department metadata
//! - [`students`]: Students and their category profiles
//! - [`programs`]: Department programs (classes and events)
//! - [`attendance`]: Attendance sessions and records

pub mod attendance;
pub mod departments;
pub mod ids;
pub mod programs;
pub mod roles;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use ids::{DepartmentId, ProgramId, RecordId, SessionId, StudentId, UserId};
pub use roles::{Role, UnknownRole, role_hierarchy_level};

pub use users::{CreateUserDto, LoginRequest, TokenPair, UpdateUserDto, User};

pub use departments::{CreateDepartmentDto, Department, UpdateDepartmentDto};

pub use students::{
    CreateStudentDto, Gender, PaginatedStudentsResponse, Student, StudentCategory,
    StudentFilterParams, UpdateStudentDto,
};

pub use programs::{CreateProgramDto, Program, ProgramKind, UpdateProgramDto};

pub use attendance::{
    AttendanceRecord, AttendanceSession, AttendanceStatus, CollectAttendanceDto, CreateSessionDto,
    RecordEntryDto, SessionFilterParams, SessionWithRecords,
};
