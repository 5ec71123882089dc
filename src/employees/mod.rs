//! Employees Module
//! Mission: CRUD over the in-memory employee list

pub mod api;
pub mod models;
pub mod repository;
pub mod store;

pub use api::{EmployeeApiError, EmployeeState};
pub use models::{Employee, EmployeeFields};
pub use repository::{EmployeeRepository, JsonFileRepository};
pub use store::EmployeeStore;
