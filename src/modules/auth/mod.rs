//! Authentication: login, token refresh, and the current-account view.

mod service;

pub use service::AuthService;
