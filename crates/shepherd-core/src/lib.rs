//! # Shepherd Core
//!
//! Core types, errors, and utilities for the Shepherd API.
//!
//! This crate provides foundational types used throughout the Shepherd
//! application:
//!
//! - [`errors`]: Application error types and the authorization deny taxonomy
//! - [`pagination`]: Pagination utilities for list responses
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use shepherd_core::errors::AppError;
//! use shepherd_core::pagination::PaginationParams;
//! use shepherd_core::password::{hash_password, verify_password};
//!
//! // Create an error
//! let error = AppError::not_found("User not found");
//!
//! // Hash a password
//! let hash = hash_password("secure_password")?;
//!
//! // Use pagination
//! let params = PaginationParams::default();
//! let limit = params.limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError, DenyReason};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
