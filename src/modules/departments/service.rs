//! Department management service.

use shepherd_core::errors::AppError;
use shepherd_core::pagination::{PaginationMeta, PaginationParams};
use shepherd_models::departments::{CreateDepartmentDto, Department, UpdateDepartmentDto};
use shepherd_models::ids::DepartmentId;
use tracing::instrument;
use validator::Validate;

use crate::guards::DepartmentGuard;
use crate::principal::Principal;
use crate::store::{AttendanceStore, DepartmentStore, ProgramStore, StudentStore, UserStore};

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip_all, fields(caller = %principal.id, name = %dto.name))]
    pub async fn create_department<S: DepartmentStore>(
        store: &S,
        principal: &Principal,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        dto.validate()?;
        DepartmentGuard::check_create(principal)?;

        let department = Department {
            id: DepartmentId::new(),
            name: dto.name,
            description: dto.description,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let created = store.insert_department(department).await?;
        tracing::info!(department_id = %created.id, "department created");
        Ok(created)
    }

    #[instrument(skip_all, fields(caller = %principal.id, department_id = %id))]
    pub async fn get_department<S: DepartmentStore>(
        store: &S,
        principal: &Principal,
        id: DepartmentId,
    ) -> Result<Department, AppError> {
        DepartmentGuard::check_read(principal)?;
        store
            .find_department(id)
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))
    }

    #[instrument(skip_all, fields(caller = %principal.id))]
    pub async fn list_departments<S: DepartmentStore>(
        store: &S,
        principal: &Principal,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Department>, PaginationMeta), AppError> {
        DepartmentGuard::check_list(principal)?;
        let (departments, total) = store.list_departments(pagination).await?;
        Ok((departments, pagination.meta(total)))
    }

    #[instrument(skip_all, fields(caller = %principal.id, department_id = %id))]
    pub async fn update_department<S: DepartmentStore>(
        store: &S,
        principal: &Principal,
        id: DepartmentId,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        dto.validate()?;
        DepartmentGuard::check_update(principal)?;

        let mut department = store
            .find_department(id)
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))?;

        if let Some(name) = dto.name {
            department.name = name;
        }
        if let Some(description) = dto.description {
            department.description = Some(description);
        }
        department.updated_at = Some(chrono::Utc::now());
        store.update_department(department).await
    }

    /// Delete a department. There is no cascade: the delete is refused
    /// while any user, student, program, or session still references it.
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %id))]
    pub async fn delete_department<S>(
        store: &S,
        principal: &Principal,
        id: DepartmentId,
    ) -> Result<(), AppError>
    where
        S: DepartmentStore + UserStore + StudentStore + ProgramStore + AttendanceStore,
    {
        DepartmentGuard::check_delete(principal)?;

        if store.find_department(id).await?.is_none() {
            return Err(AppError::not_found("Department not found"));
        }

        if store.count_users_assigned(id).await? > 0 {
            return Err(AppError::conflict(
                "Department still has assigned users",
            ));
        }
        if store.count_students_in_department(id).await? > 0 {
            return Err(AppError::conflict("Department still has students"));
        }
        if store.count_programs_in_department(id).await? > 0 {
            return Err(AppError::conflict("Department still has programs"));
        }
        if store.count_sessions_in_department(id).await? > 0 {
            return Err(AppError::conflict(
                "Department still has attendance sessions",
            ));
        }

        store.delete_department(id).await?;
        tracing::info!(department_id = %id, "department deleted");
        Ok(())
    }
}
