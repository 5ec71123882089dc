//! Mock Employee API Library
//!
//! Login/registration, a session-protected profile and employee CRUD over
//! an in-memory list. Exposed for the binary and integration tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod employees;
pub mod middleware;
pub mod validation;

pub use app::build_app;
pub use config::Config;
