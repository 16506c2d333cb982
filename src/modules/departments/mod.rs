//! Department management: globally readable metadata, root-only writes.

mod service;

pub use service::DepartmentService;
