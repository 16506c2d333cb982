//! # Shepherd API
//!
//! A membership-management backend core built in Rust that implements a
//! hierarchical, department-scoped role-based access control system for
//! managing departments, members ("students"), programs, and attendance.
//!
//! ## Overview
//!
//! Shepherd provides the decision core of a membership backend:
//!
//! - **Authentication**: JWT-based authentication with access and refresh
//!   tokens; credentials resolve to an immutable per-request [`principal::Principal`]
//! - **Role-Based Access Control**: a closed three-role hierarchy
//!   (Super Admin, Admin, Manager) where authority depends on the scoped
//!   relationship between the caller and the target's department(s)
//! - **Department Scoping**: Admins and Managers act only inside their
//!   assigned departments; Super Admins are unscoped
//! - **Attendance**: department-scoped programs, sessions, and roster
//!   collection
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture:
//!
//! ```text
//! src/
//! ├── authz/            # Authorization engine (rule table + visibility)
//! ├── guards/           # Per-entity policy wrappers around the engine
//! ├── principal.rs      # Credential -> Principal resolution
//! ├── store/            # Persistence traits + in-memory reference store
//! └── modules/          # Feature modules (auth, users, students, ...)
//!     └── <entity>/service.rs   # Mutation coordinators
//! ```
//!
//! The HTTP layer and a real database are deliberately absent: services are
//! generic over the [`store`] traits, which is the seam where a SQL-backed
//! implementation plugs in.
//!
//! ## Role Hierarchy
//!
//! ```text
//! Super Admin (global, department assignments ignored)
//!     ↓ creates departments, Admins, any user
//! Admin (department-scoped; may create Managers inside its departments)
//!     ↓
//! Manager (department-scoped day-to-day work; no user management)
//! ```
//!
//! Every request follows the same path: resolve the credential to a
//! `Principal` snapshot, let the entity's guard build a resource descriptor
//! and ask the engine for a decision, and only on Allow touch the store.
//! Denies short-circuit before any write. The engine itself is pure and
//! stateless; concurrent requests never interfere.
//!
//! ## Security Considerations
//!
//! - Passwords are hashed with bcrypt
//! - Access tokens carry only the subject id; role and scope are looked up
//!   fresh on every request
//! - All authorization failures surface as one opaque "forbidden" message;
//!   internal deny reasons are kept for audit logs only
//! - Reads return "not found" identically for absent and out-of-scope rows

pub mod authz;
pub mod guards;
pub mod modules;
pub mod principal;
pub mod store;

// Re-export workspace crates for convenience
pub use shepherd_auth;
pub use shepherd_config;
pub use shepherd_core;
pub use shepherd_models;
