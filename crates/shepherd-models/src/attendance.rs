//! Attendance models and DTOs.
//!
//! An [`AttendanceSession`] is one sitting (a dated occurrence of a program
//! for one student category in one department); [`AttendanceRecord`]s hang
//! off it, one per student. Collection replaces a session's records
//! wholesale so the roster UI can submit the full checklist idempotently.

use crate::ids::{DepartmentId, ProgramId, RecordId, SessionId, StudentId, UserId};
use crate::students::StudentCategory;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSession {
    pub id: SessionId,
    pub date: chrono::NaiveDate,
    pub department_id: DepartmentId,
    /// The student category this sitting applies to.
    pub target_category: StudentCategory,
    pub program_id: ProgramId,
    pub created_by: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub session_id: SessionId,
    pub student_id: StudentId,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionDto {
    pub date: chrono::NaiveDate,
    pub department_id: DepartmentId,
    pub target_category: StudentCategory,
    pub program_id: ProgramId,
}

/// One checklist row submitted during collection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordEntryDto {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
}

/// Full checklist submission for a session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollectAttendanceDto {
    #[validate(nested)]
    pub entries: Vec<RecordEntryDto>,
}

/// A session together with its collected records.
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithRecords {
    #[serde(flatten)]
    pub session: AttendanceSession,
    pub records: Vec<AttendanceRecord>,
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionFilterParams {
    pub department_id: Option<DepartmentId>,
    pub category: Option<StudentCategory>,
    pub program_id: Option<ProgramId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Excused).unwrap(),
            r#""EXCUSED""#
        );
    }

    #[test]
    fn test_collect_dto_validates_entries() {
        let dto = CollectAttendanceDto {
            entries: vec![RecordEntryDto {
                student_id: StudentId::new(),
                status: AttendanceStatus::Present,
                remarks: Some("x".repeat(501)),
            }],
        };
        assert!(dto.validate().is_err());
    }
}
