//! User management: account CRUD under the role hierarchy.

mod service;

pub use service::UserService;
