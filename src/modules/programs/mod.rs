//! Program management: classes and events inside a department.

mod service;

pub use service::ProgramService;
