//! Program management service.
//!
//! Programs are archived instead of deleted so attendance sessions keep a
//! valid program reference forever.

use shepherd_core::errors::AppError;
use shepherd_models::ids::{DepartmentId, ProgramId};
use shepherd_models::programs::{CreateProgramDto, Program, UpdateProgramDto};
use tracing::instrument;
use validator::Validate;

use crate::guards::ProgramGuard;
use crate::principal::Principal;
use crate::store::{DepartmentStore, ProgramStore};

pub struct ProgramService;

impl ProgramService {
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %dto.department_id))]
    pub async fn create_program<S: ProgramStore + DepartmentStore>(
        store: &S,
        principal: &Principal,
        dto: CreateProgramDto,
    ) -> Result<Program, AppError> {
        dto.validate()?;
        ProgramGuard::check_create(principal, dto.department_id)?;

        if store.find_department(dto.department_id).await?.is_none() {
            return Err(AppError::not_found("Department not found"));
        }

        let program = Program {
            id: ProgramId::new(),
            name: dto.name,
            department_id: dto.department_id,
            kind: dto.kind,
            description: dto.description,
            is_active: true,
            created_by: Some(principal.id),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let created = store.insert_program(program).await?;
        tracing::info!(program_id = %created.id, "program created");
        Ok(created)
    }

    /// Fetch one program. Out-of-scope rows read as absent.
    #[instrument(skip_all, fields(caller = %principal.id, program_id = %id))]
    pub async fn get_program<S: ProgramStore>(
        store: &S,
        principal: &Principal,
        id: ProgramId,
    ) -> Result<Program, AppError> {
        let program = store
            .find_program(id)
            .await?
            .ok_or_else(|| AppError::not_found("Program not found"))?;
        ProgramGuard::check_read(principal, &program)
            .map_err(|e| e.conceal("Program not found"))?;
        Ok(program)
    }

    /// Programs of one department. Archived programs are included only on
    /// request.
    #[instrument(skip_all, fields(caller = %principal.id, department_id = %department_id))]
    pub async fn list_programs<S: ProgramStore>(
        store: &S,
        principal: &Principal,
        department_id: DepartmentId,
        include_archived: bool,
    ) -> Result<Vec<Program>, AppError> {
        ProgramGuard::check_list(principal, department_id)?;
        store.list_programs(department_id, include_archived).await
    }

    #[instrument(skip_all, fields(caller = %principal.id, program_id = %id))]
    pub async fn update_program<S: ProgramStore>(
        store: &S,
        principal: &Principal,
        id: ProgramId,
        dto: UpdateProgramDto,
    ) -> Result<Program, AppError> {
        dto.validate()?;

        let mut program = store
            .find_program(id)
            .await?
            .ok_or_else(|| AppError::not_found("Program not found"))?;
        ProgramGuard::check_update(principal, &program)?;

        if let Some(name) = dto.name {
            program.name = name;
        }
        if let Some(kind) = dto.kind {
            program.kind = kind;
        }
        if let Some(description) = dto.description {
            program.description = Some(description);
        }
        program.updated_at = Some(chrono::Utc::now());
        store.update_program(program).await
    }

    /// Soft-delete: clears `is_active` and leaves the row in place.
    #[instrument(skip_all, fields(caller = %principal.id, program_id = %id))]
    pub async fn archive_program<S: ProgramStore>(
        store: &S,
        principal: &Principal,
        id: ProgramId,
    ) -> Result<Program, AppError> {
        let mut program = store
            .find_program(id)
            .await?
            .ok_or_else(|| AppError::not_found("Program not found"))?;
        ProgramGuard::check_archive(principal, &program)?;

        if !program.is_active {
            return Err(AppError::conflict("Program is already archived"));
        }
        program.is_active = false;
        program.updated_at = Some(chrono::Utc::now());
        let archived = store.update_program(program).await?;
        tracing::info!(program_id = %id, "program archived");
        Ok(archived)
    }
}
