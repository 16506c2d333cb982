//! Attendance: sessions and roster collection.

mod service;

pub use service::AttendanceService;
