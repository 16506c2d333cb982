//! Attendance service.
//!
//! A session is one dated sitting of a program for one student category.
//! Collection replaces the session's full record set, so resubmitting a
//! corrected checklist is idempotent.

use std::collections::BTreeSet;

use shepherd_core::errors::AppError;
use shepherd_core::pagination::PaginationParams;
use shepherd_models::attendance::{
    AttendanceRecord, AttendanceSession, CollectAttendanceDto, CreateSessionDto,
    SessionFilterParams, SessionWithRecords,
};
use shepherd_models::ids::{DepartmentId, RecordId, SessionId};
use shepherd_models::students::{Student, StudentCategory};
use tracing::instrument;
use validator::Validate;

use crate::guards::{AttendanceGuard, StudentGuard};
use crate::principal::Principal;
use crate::store::{AttendanceStore, DepartmentStore, ProgramStore, StudentStore};

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %dto.department_id))]
    pub async fn create_session<S>(
        store: &S,
        principal: &Principal,
        dto: CreateSessionDto,
    ) -> Result<AttendanceSession, AppError>
    where
        S: AttendanceStore + DepartmentStore + ProgramStore,
    {
        dto.validate()?;
        AttendanceGuard::check_create(principal, dto.department_id)?;

        if store.find_department(dto.department_id).await?.is_none() {
            return Err(AppError::not_found("Department not found"));
        }
        let program = store
            .find_program(dto.program_id)
            .await?
            .ok_or_else(|| AppError::not_found("Program not found"))?;
        if program.department_id != dto.department_id {
            return Err(AppError::conflict(
                "Program belongs to a different department",
            ));
        }
        if !program.is_active {
            return Err(AppError::conflict("Program is archived"));
        }

        let session = AttendanceSession {
            id: SessionId::new(),
            date: dto.date,
            department_id: dto.department_id,
            target_category: dto.target_category,
            program_id: dto.program_id,
            created_by: Some(principal.id),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let created = store.insert_session(session).await?;
        tracing::info!(session_id = %created.id, "attendance session created");
        Ok(created)
    }

    /// Submit the checklist for a session, replacing earlier records.
    ///
    /// Every entry must reference a student of the session's department and
    /// target category; a single bad entry rejects the whole submission.
    #[instrument(skip_all, fields(caller = %principal.id, session_id = %session_id))]
    pub async fn collect<S>(
        store: &S,
        principal: &Principal,
        session_id: SessionId,
        dto: CollectAttendanceDto,
    ) -> Result<SessionWithRecords, AppError>
    where
        S: AttendanceStore + StudentStore,
    {
        dto.validate()?;

        let session = store
            .find_session(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Attendance session not found"))?;
        AttendanceGuard::check_collect(principal, &session)?;

        let mut seen = BTreeSet::new();
        let mut records = Vec::with_capacity(dto.entries.len());
        for entry in dto.entries {
            if !seen.insert(entry.student_id) {
                return Err(AppError::validation(
                    "Duplicate student in attendance submission",
                ));
            }
            let student = store
                .find_student(entry.student_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown student in submission"))?;
            if student.department_id != session.department_id
                || student.category != session.target_category
            {
                return Err(AppError::validation(
                    "Student is not part of this session's roster",
                ));
            }
            records.push(AttendanceRecord {
                id: RecordId::new(),
                session_id,
                student_id: entry.student_id,
                status: entry.status,
                remarks: entry.remarks,
            });
        }

        let records = store.replace_records(session_id, records).await?;
        tracing::info!(
            session_id = %session_id,
            records = records.len(),
            "attendance collected"
        );
        Ok(SessionWithRecords { session, records })
    }

    /// Fetch one session with its records. Out-of-scope sessions read as
    /// absent.
    #[instrument(skip_all, fields(caller = %principal.id, session_id = %id))]
    pub async fn get_session<S: AttendanceStore>(
        store: &S,
        principal: &Principal,
        id: SessionId,
    ) -> Result<SessionWithRecords, AppError> {
        let session = store
            .find_session(id)
            .await?
            .ok_or_else(|| AppError::not_found("Attendance session not found"))?;
        AttendanceGuard::check_read(principal, &session)
            .map_err(|e| e.conceal("Attendance session not found"))?;
        let records = store.records_for_session(id).await?;
        Ok(SessionWithRecords { session, records })
    }

    #[instrument(skip_all, fields(caller = %principal.id))]
    pub async fn list_sessions<S: AttendanceStore>(
        store: &S,
        principal: &Principal,
        params: &SessionFilterParams,
    ) -> Result<Vec<AttendanceSession>, AppError> {
        let filter = AttendanceGuard::check_list(principal, params.department_id)?;
        store.list_sessions(&filter, params).await
    }

    #[instrument(skip_all, fields(caller = %principal.id, session_id = %id))]
    pub async fn delete_session<S: AttendanceStore>(
        store: &S,
        principal: &Principal,
        id: SessionId,
    ) -> Result<(), AppError> {
        let session = store
            .find_session(id)
            .await?
            .ok_or_else(|| AppError::not_found("Attendance session not found"))?;
        AttendanceGuard::check_delete(principal, &session)?;
        // Records go with the session.
        store.delete_session(id).await?;
        tracing::info!(session_id = %id, "attendance session deleted");
        Ok(())
    }

    /// The roster a collection screen should offer: students of the
    /// session's department and target category.
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %department_id))]
    pub async fn eligible_students<S: StudentStore>(
        store: &S,
        principal: &Principal,
        department_id: DepartmentId,
        category: StudentCategory,
    ) -> Result<Vec<Student>, AppError> {
        let filter = StudentGuard::check_list(principal, Some(department_id))?;
        // The roster is the full set, not a page; drain it page by page.
        let mut students = Vec::new();
        let mut offset = 0;
        loop {
            let params = PaginationParams {
                limit: Some(100),
                offset: Some(offset),
                page: None,
            };
            let (page, total) = store
                .list_students(&filter, Some(department_id), Some(category), &params)
                .await?;
            let fetched = page.len() as i64;
            students.extend(page);
            offset += fetched;
            if offset >= total || fetched == 0 {
                break;
            }
        }
        Ok(students)
    }
}
