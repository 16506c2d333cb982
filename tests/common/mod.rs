//! Shared fixtures for integration tests.
//!
//! `TestWorld::seed` builds an in-memory store with two departments and one
//! account per role, so tests can exercise the full policy matrix without
//! repeating setup.

#![allow(dead_code)]

use std::collections::BTreeSet;

use shepherd::principal::Principal;
use shepherd::store::{DepartmentStore, InMemoryStore, StudentStore, UserStore};
use shepherd_config::JwtConfig;
use shepherd_core::password::hash_password;
use shepherd_models::departments::Department;
use shepherd_models::ids::{DepartmentId, StudentId, UserId};
use shepherd_models::roles::Role;
use shepherd_models::students::{Gender, Student, StudentCategory};
use shepherd_models::users::User;

/// The password every seeded account logs in with.
pub const PASSWORD: &str = "password123";

static TRACING: std::sync::Once = std::sync::Once::new();

/// Route spans to the test writer; `RUST_LOG` controls verbosity.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestWorld {
    pub store: InMemoryStore,
    pub jwt: JwtConfig,
    /// "Children" department.
    pub alpha: DepartmentId,
    /// "Youth" department.
    pub beta: DepartmentId,
    pub root_user: User,
    pub admin_user: User,
    pub manager_user: User,
}

impl TestWorld {
    /// Two departments; a Super Admin; an Admin and a Manager, both
    /// assigned to `alpha` only.
    pub async fn seed() -> Self {
        init_tracing();
        let store = InMemoryStore::new();

        let alpha = seed_department(&store, "Children").await;
        let beta = seed_department(&store, "Youth").await;

        let root_user = seed_user(&store, "root@example.com", Role::SuperAdmin, &[]).await;
        let admin_user = seed_user(&store, "admin@example.com", Role::Admin, &[alpha]).await;
        let manager_user =
            seed_user(&store, "manager@example.com", Role::Manager, &[alpha]).await;

        Self {
            store,
            jwt: JwtConfig::for_tests(),
            alpha,
            beta,
            root_user,
            admin_user,
            manager_user,
        }
    }

    pub fn root(&self) -> Principal {
        Principal::from_user(&self.root_user)
    }

    pub fn admin(&self) -> Principal {
        Principal::from_user(&self.admin_user)
    }

    pub fn manager(&self) -> Principal {
        Principal::from_user(&self.manager_user)
    }
}

pub async fn seed_department(store: &InMemoryStore, name: &str) -> DepartmentId {
    let department = Department {
        id: DepartmentId::new(),
        name: name.to_string(),
        description: None,
        created_at: chrono::Utc::now(),
        updated_at: None,
    };
    store.insert_department(department).await.unwrap().id
}

pub async fn seed_user(
    store: &InMemoryStore,
    email: &str,
    role: Role,
    departments: &[DepartmentId],
) -> User {
    let user = User {
        id: UserId::new(),
        email: email.to_string(),
        password_hash: hash_password(PASSWORD).unwrap(),
        full_name: email.split('@').next().unwrap().to_string(),
        role,
        department_ids: departments.iter().copied().collect::<BTreeSet<_>>(),
        is_active: true,
        created_at: chrono::Utc::now(),
        updated_at: None,
    };
    store.insert_user(user).await.unwrap()
}

pub async fn seed_student(
    store: &InMemoryStore,
    name: &str,
    department_id: DepartmentId,
    category: StudentCategory,
) -> Student {
    let student = Student {
        id: StudentId::new(),
        name: name.to_string(),
        age: 12,
        sex: Gender::Female,
        church: None,
        category,
        profile: None,
        department_id,
        created_by: None,
        created_at: chrono::Utc::now(),
        updated_at: None,
    };
    store.insert_student(student).await.unwrap()
}
