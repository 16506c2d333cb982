//! Department reads are global; writes and deletes are root-only, and a
//! delete never cascades.

mod common;

use common::{TestWorld, seed_student, seed_user};
use shepherd::modules::departments::DepartmentService;
use shepherd_core::errors::AppError;
use shepherd_core::pagination::PaginationParams;
use shepherd_models::departments::{CreateDepartmentDto, UpdateDepartmentDto};
use shepherd_models::roles::Role;
use shepherd_models::students::StudentCategory;

#[tokio::test]
async fn test_any_role_reads_departments() {
    let world = TestWorld::seed().await;

    for principal in [world.root(), world.admin(), world.manager()] {
        let dept = DepartmentService::get_department(&world.store, &principal, world.beta)
            .await
            .unwrap();
        assert_eq!(dept.name, "Youth");

        let (all, meta) = DepartmentService::list_departments(
            &world.store,
            &principal,
            &PaginationParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(meta.total, 2);
        assert_eq!(all.len(), 2);
    }
}

#[tokio::test]
async fn test_only_root_writes_departments() {
    let world = TestWorld::seed().await;
    let dto = CreateDepartmentDto {
        name: "Media".to_string(),
        description: None,
    };

    for principal in [world.admin(), world.manager()] {
        let err = DepartmentService::create_department(&world.store, &principal, dto.clone())
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    let created = DepartmentService::create_department(&world.store, &world.root(), dto)
        .await
        .unwrap();
    assert_eq!(created.name, "Media");

    let renamed = DepartmentService::update_department(
        &world.store,
        &world.root(),
        created.id,
        UpdateDepartmentDto {
            name: Some("Media & Sound".to_string()),
            description: Some("AV team".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Media & Sound");
    assert!(renamed.updated_at.is_some());
}

#[tokio::test]
async fn test_department_names_are_unique() {
    let world = TestWorld::seed().await;
    let err = DepartmentService::create_department(
        &world.store,
        &world.root(),
        CreateDepartmentDto {
            name: "children".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_refused_while_referenced() {
    let world = TestWorld::seed().await;
    let root = world.root();

    // alpha still has an admin and a manager assigned.
    let err = DepartmentService::delete_department(&world.store, &root, world.alpha)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // beta is empty of users, but give it a student.
    seed_student(&world.store, "S", world.beta, StudentCategory::Youth).await;
    let err = DepartmentService::delete_department(&world.store, &root, world.beta)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_unreferenced_department() {
    let world = TestWorld::seed().await;
    let root = world.root();

    let created = DepartmentService::create_department(
        &world.store,
        &root,
        CreateDepartmentDto {
            name: "Ushering".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    DepartmentService::delete_department(&world.store, &root, created.id)
        .await
        .unwrap();

    let err = DepartmentService::get_department(&world.store, &root, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_by_admin_denied_before_reference_checks() {
    let world = TestWorld::seed().await;
    // Even an unreferenced department is protected from non-root deletes.
    seed_user(&world.store, "x@example.com", Role::Admin, &[world.beta]).await;
    let principal = world.admin();
    let err = DepartmentService::delete_department(&world.store, &principal, world.beta)
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
}
