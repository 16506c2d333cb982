//! Program lifecycle: create, update, archive, and scoped listings.

mod common;

use common::TestWorld;
use shepherd::modules::programs::ProgramService;
use shepherd_core::errors::{AppError, DenyReason};
use shepherd_models::ids::DepartmentId;
use shepherd_models::programs::{CreateProgramDto, ProgramKind, UpdateProgramDto};

fn create_dto(name: &str, department_id: DepartmentId, kind: ProgramKind) -> CreateProgramDto {
    CreateProgramDto {
        name: name.to_string(),
        department_id,
        kind,
        description: None,
    }
}

#[tokio::test]
async fn test_manager_creates_program_in_scope() {
    let world = TestWorld::seed().await;
    let manager = world.manager();

    let program = ProgramService::create_program(
        &world.store,
        &manager,
        create_dto("Sunday Class", world.alpha, ProgramKind::Regular),
    )
    .await
    .unwrap();
    assert!(program.is_active);
    assert_eq!(program.created_by, Some(manager.id));

    let err = ProgramService::create_program(
        &world.store,
        &manager,
        create_dto("Retreat", world.beta, ProgramKind::Event),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(DenyReason::OutOfScope)));
}

#[tokio::test]
async fn test_archive_hides_program_from_default_listing() {
    let world = TestWorld::seed().await;
    let manager = world.manager();

    let program = ProgramService::create_program(
        &world.store,
        &manager,
        create_dto("Choir Practice", world.alpha, ProgramKind::Regular),
    )
    .await
    .unwrap();

    let archived = ProgramService::archive_program(&world.store, &manager, program.id)
        .await
        .unwrap();
    assert!(!archived.is_active);

    let active = ProgramService::list_programs(&world.store, &manager, world.alpha, false)
        .await
        .unwrap();
    assert!(active.is_empty());

    let with_archived = ProgramService::list_programs(&world.store, &manager, world.alpha, true)
        .await
        .unwrap();
    assert_eq!(with_archived.len(), 1);

    // Archiving twice conflicts rather than silently succeeding.
    let err = ProgramService::archive_program(&world.store, &manager, program.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_out_of_scope_program_reads_as_absent() {
    let world = TestWorld::seed().await;
    let program = ProgramService::create_program(
        &world.store,
        &world.root(),
        create_dto("Youth Night", world.beta, ProgramKind::Event),
    )
    .await
    .unwrap();

    let err = ProgramService::get_program(&world.store, &world.manager(), program.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = ProgramService::list_programs(&world.store, &world.manager(), world.beta, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(DenyReason::OutOfScope)));
}

#[tokio::test]
async fn test_update_program_fields() {
    let world = TestWorld::seed().await;
    let program = ProgramService::create_program(
        &world.store,
        &world.admin(),
        create_dto("Camp", world.alpha, ProgramKind::Event),
    )
    .await
    .unwrap();

    let updated = ProgramService::update_program(
        &world.store,
        &world.admin(),
        program.id,
        UpdateProgramDto {
            name: Some("Summer Camp".to_string()),
            kind: None,
            description: Some("Annual".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Summer Camp");
    assert_eq!(updated.description.as_deref(), Some("Annual"));
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_create_requires_existing_department() {
    let world = TestWorld::seed().await;
    let err = ProgramService::create_program(
        &world.store,
        &world.root(),
        create_dto("Nowhere", DepartmentId::new(), ProgramKind::Regular),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
