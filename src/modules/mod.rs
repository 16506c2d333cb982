//! Feature modules.
//!
//! Each module owns the mutation coordinator ("service") for one entity
//! family. Services are stateless structs with static async functions,
//! generic over the [`crate::store`] traits; the one shared pattern is
//! validate, guard, existence-check, then write.

pub mod attendance;
pub mod auth;
pub mod departments;
pub mod programs;
pub mod students;
pub mod users;
