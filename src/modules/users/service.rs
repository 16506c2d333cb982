//! User management service.
//!
//! The coordinator sequence for every mutation is the same: validate the
//! payload, ask the guard, check referenced rows exist, then write. The
//! guard runs before any existence check so a denied caller learns nothing
//! about which departments or accounts exist.

use shepherd_core::errors::AppError;
use shepherd_core::pagination::{PaginationMeta, PaginationParams};
use shepherd_core::password::hash_password;
use shepherd_models::ids::{DepartmentId, UserId};
use shepherd_models::users::{CreateUserDto, UpdateUserDto, User};
use tracing::instrument;
use validator::Validate;

use crate::guards::UserGuard;
use crate::principal::Principal;
use crate::store::{DepartmentStore, UserStore};

pub struct UserService;

impl UserService {
    #[instrument(skip_all, fields(caller = %principal.id, role = %dto.role))]
    pub async fn create_user<S: UserStore + DepartmentStore>(
        store: &S,
        principal: &Principal,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        dto.validate()?;
        UserGuard::check_create(principal, dto.role, &dto.department_ids)?;

        // Scoped roles must be anchored to at least one department even
        // when the caller is a Super Admin.
        if dto.role.is_department_scoped() && dto.department_ids.is_empty() {
            return Err(AppError::validation(
                "Admin and Manager accounts require at least one department",
            ));
        }
        ensure_departments_exist(store, &dto.department_ids).await?;

        // A Super Admin's assignment set is always empty, whatever the
        // payload carried.
        let department_ids = if dto.role.is_super_admin() {
            Vec::new()
        } else {
            dto.department_ids
        };

        let now = chrono::Utc::now();
        let user = User {
            id: UserId::new(),
            email: dto.email,
            password_hash: hash_password(&dto.password)?,
            full_name: dto.full_name,
            role: dto.role,
            department_ids: department_ids.into_iter().collect(),
            is_active: true,
            created_at: now,
            updated_at: None,
        };

        let created = store.insert_user(user).await?;
        tracing::info!(user_id = %created.id, "user created");
        Ok(created)
    }

    /// Fetch one account. Out-of-scope rows read as absent.
    #[instrument(skip_all, fields(caller = %principal.id, user_id = %id))]
    pub async fn get_user<S: UserStore>(
        store: &S,
        principal: &Principal,
        id: UserId,
    ) -> Result<User, AppError> {
        let user = store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        UserGuard::check_read(principal, &user)
            .map_err(|e| e.conceal("User not found"))?;
        Ok(user)
    }

    #[instrument(skip_all, fields(caller = %principal.id))]
    pub async fn list_users<S: UserStore>(
        store: &S,
        principal: &Principal,
        pagination: &PaginationParams,
    ) -> Result<(Vec<User>, PaginationMeta), AppError> {
        let (filter, role) = UserGuard::check_list(principal)?;
        let (users, total) = store.list_users(&filter, role, pagination).await?;
        Ok((users, pagination.meta(total)))
    }

    #[instrument(skip_all, fields(caller = %principal.id, user_id = %id))]
    pub async fn update_user<S: UserStore + DepartmentStore>(
        store: &S,
        principal: &Principal,
        id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        dto.validate()?;

        let mut user = store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        UserGuard::check_update(principal, &user)?;

        if let Some(department_ids) = &dto.department_ids {
            ensure_departments_exist(store, department_ids).await?;
        }

        if let Some(email) = dto.email {
            user.email = email;
        }
        if let Some(full_name) = dto.full_name {
            user.full_name = full_name;
        }
        if let Some(role) = dto.role {
            user.role = role;
        }
        if let Some(is_active) = dto.is_active {
            user.is_active = is_active;
        }
        if let Some(department_ids) = dto.department_ids {
            user.department_ids = department_ids.into_iter().collect();
        }

        if user.role.is_department_scoped() && user.department_ids.is_empty() {
            return Err(AppError::validation(
                "Admin and Manager accounts require at least one department",
            ));
        }
        // A Super Admin's assignment set is always empty; a promotion drops
        // whatever the account carried as a scoped role.
        if user.role.is_super_admin() {
            user.department_ids.clear();
        }

        user.updated_at = Some(chrono::Utc::now());
        store.update_user(user).await
    }

    #[instrument(skip_all, fields(caller = %principal.id, user_id = %id))]
    pub async fn delete_user<S: UserStore>(
        store: &S,
        principal: &Principal,
        id: UserId,
    ) -> Result<(), AppError> {
        if principal.id == id {
            return Err(AppError::validation("Cannot delete your own account"));
        }
        let user = store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        UserGuard::check_delete(principal, &user)?;
        store.delete_user(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}

async fn ensure_departments_exist<S: DepartmentStore>(
    store: &S,
    department_ids: &[DepartmentId],
) -> Result<(), AppError> {
    for &dept in department_ids {
        if store.find_department(dept).await?.is_none() {
            return Err(AppError::not_found("Department not found"));
        }
    }
    Ok(())
}
