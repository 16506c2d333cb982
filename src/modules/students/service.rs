//! Student management service.

use shepherd_core::errors::AppError;
use shepherd_models::ids::StudentId;
use shepherd_models::students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use tracing::instrument;
use validator::Validate;

use crate::guards::StudentGuard;
use crate::principal::Principal;
use crate::store::{DepartmentStore, StudentStore};

pub struct StudentService;

impl StudentService {
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %dto.department_id))]
    pub async fn create_student<S: StudentStore + DepartmentStore>(
        store: &S,
        principal: &Principal,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        dto.validate()?;
        StudentGuard::check_create(principal, dto.department_id)?;

        if store.find_department(dto.department_id).await?.is_none() {
            return Err(AppError::not_found("Department not found"));
        }

        let student = Student {
            id: StudentId::new(),
            name: dto.name,
            age: dto.age,
            sex: dto.sex,
            church: dto.church,
            category: dto.category,
            profile: dto.profile,
            department_id: dto.department_id,
            created_by: Some(principal.id),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let created = store.insert_student(student).await?;
        tracing::info!(student_id = %created.id, "student created");
        Ok(created)
    }

    /// Fetch one student. Out-of-scope rows read as absent.
    #[instrument(skip_all, fields(caller = %principal.id, student_id = %id))]
    pub async fn get_student<S: StudentStore>(
        store: &S,
        principal: &Principal,
        id: StudentId,
    ) -> Result<Student, AppError> {
        let student = store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        StudentGuard::check_read(principal, &student)
            .map_err(|e| e.conceal("Student not found"))?;
        Ok(student)
    }

    #[instrument(skip_all, fields(caller = %principal.id))]
    pub async fn list_students<S: StudentStore>(
        store: &S,
        principal: &Principal,
        params: &StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let filter = StudentGuard::check_list(principal, params.department_id)?;
        let (data, total) = store
            .list_students(
                &filter,
                params.department_id,
                params.category,
                &params.pagination,
            )
            .await?;
        Ok(PaginatedStudentsResponse {
            data,
            meta: params.pagination.meta(total),
        })
    }

    #[instrument(skip_all, fields(caller = %principal.id, student_id = %id))]
    pub async fn update_student<S: StudentStore + DepartmentStore>(
        store: &S,
        principal: &Principal,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        dto.validate()?;

        let mut student = store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        // One decision covers the current department and, for a move, the
        // destination too.
        StudentGuard::check_update(principal, &student, dto.department_id)?;

        if let Some(dept) = dto.department_id {
            if store.find_department(dept).await?.is_none() {
                return Err(AppError::not_found("Department not found"));
            }
            student.department_id = dept;
        }
        if let Some(name) = dto.name {
            student.name = name;
        }
        if let Some(age) = dto.age {
            student.age = age;
        }
        if let Some(sex) = dto.sex {
            student.sex = sex;
        }
        if let Some(church) = dto.church {
            student.church = Some(church);
        }
        if let Some(category) = dto.category {
            student.category = category;
        }
        if let Some(profile) = dto.profile {
            student.profile = Some(profile);
        }
        student.updated_at = Some(chrono::Utc::now());
        store.update_student(student).await
    }

    #[instrument(skip_all, fields(caller = %principal.id, student_id = %id))]
    pub async fn delete_student<S: StudentStore>(
        store: &S,
        principal: &Principal,
        id: StudentId,
    ) -> Result<(), AppError> {
        let student = store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        StudentGuard::check_delete(principal, &student)?;
        store.delete_student(id).await?;
        tracing::info!(student_id = %id, "student deleted");
        Ok(())
    }
}
