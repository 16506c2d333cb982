//! Student management: department-scoped member records.

mod service;

pub use service::StudentService;
