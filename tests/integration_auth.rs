//! Login, refresh, and principal resolution.

mod common;

use common::{PASSWORD, TestWorld, seed_user};
use shepherd::modules::auth::AuthService;
use shepherd::principal::PrincipalResolver;
use shepherd_auth::verify_access_token;
use shepherd_core::errors::{AppError, AuthError};
use shepherd_models::roles::Role;
use shepherd_models::users::LoginRequest;

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_returns_usable_token_pair() {
    let world = TestWorld::seed().await;

    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("admin@example.com", PASSWORD),
    )
    .await
    .unwrap();

    assert_eq!(pair.token_type, "bearer");
    let claims = verify_access_token(&pair.access_token, &world.jwt).unwrap();
    assert_eq!(claims.sub, world.admin_user.id.to_string());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_fail_identically() {
    let world = TestWorld::seed().await;

    let wrong_password = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("admin@example.com", "not-the-password"),
    )
    .await
    .unwrap_err();
    let unknown_email = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("nobody@example.com", PASSWORD),
    )
    .await
    .unwrap_err();

    assert_eq!(wrong_password.public_message(), unknown_email.public_message());
    assert!(matches!(
        wrong_password,
        AppError::Unauthorized(AuthError::InvalidCredential)
    ));
}

#[tokio::test]
async fn test_login_inactive_account_rejected() {
    let world = TestWorld::seed().await;
    let mut user = world.manager_user.clone();
    user.is_active = false;
    shepherd::store::UserStore::update_user(&world.store, user)
        .await
        .unwrap();

    let err = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("manager@example.com", PASSWORD),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Unauthorized(AuthError::InactiveAccount)
    ));
}

#[tokio::test]
async fn test_refresh_rotates_the_pair() {
    let world = TestWorld::seed().await;
    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("manager@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let rotated = AuthService::refresh(&world.store, &world.jwt, &pair.refresh_token)
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);

    let claims = verify_access_token(&rotated.access_token, &world.jwt).unwrap();
    assert_eq!(claims.sub, world.manager_user.id.to_string());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let world = TestWorld::seed().await;
    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("manager@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let err = AuthService::refresh(&world.store, &world.jwt, &pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_refresh_stops_for_deactivated_account() {
    let world = TestWorld::seed().await;
    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("manager@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let mut user = world.manager_user.clone();
    user.is_active = false;
    shepherd::store::UserStore::update_user(&world.store, user)
        .await
        .unwrap();

    let err = AuthService::refresh(&world.store, &world.jwt, &pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Unauthorized(AuthError::InactiveAccount)
    ));
}

#[tokio::test]
async fn test_resolver_builds_fresh_snapshot() {
    let world = TestWorld::seed().await;
    let resolver = PrincipalResolver::new(world.jwt.clone());

    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("admin@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let principal = resolver
        .resolve(&world.store, &pair.access_token)
        .await
        .unwrap();
    assert_eq!(principal.id, world.admin_user.id);
    assert_eq!(principal.role, Role::Admin);
    assert!(principal.departments.contains(&world.alpha));

    // A role change takes effect on the next resolve, same token.
    let mut promoted = world.admin_user.clone();
    promoted.role = Role::SuperAdmin;
    promoted.department_ids.clear();
    shepherd::store::UserStore::update_user(&world.store, promoted)
        .await
        .unwrap();

    let principal = resolver
        .resolve(&world.store, &pair.access_token)
        .await
        .unwrap();
    assert_eq!(principal.role, Role::SuperAdmin);
}

#[tokio::test]
async fn test_resolver_rejects_garbage_and_deleted_subjects() {
    let world = TestWorld::seed().await;
    let resolver = PrincipalResolver::new(world.jwt.clone());

    let err = resolver
        .resolve(&world.store, "not-a-token")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Unauthorized(AuthError::InvalidCredential)
    ));

    let doomed = seed_user(&world.store, "gone@example.com", Role::Manager, &[world.alpha]).await;
    let pair = AuthService::login(
        &world.store,
        &world.jwt,
        login_request("gone@example.com", PASSWORD),
    )
    .await
    .unwrap();
    shepherd::store::UserStore::delete_user(&world.store, doomed.id)
        .await
        .unwrap();

    let err = resolver
        .resolve(&world.store, &pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Unauthorized(AuthError::UnknownPrincipal)
    ));
}

#[tokio::test]
async fn test_me_returns_own_account() {
    let world = TestWorld::seed().await;
    let me = AuthService::me(&world.store, &world.manager())
        .await
        .unwrap();
    assert_eq!(me.id, world.manager_user.id);
    assert_eq!(me.email, "manager@example.com");
}
