//! Authentication Module
//! Mission: Registration, login and time-limited session tokens

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod session_store;
pub mod user_store;

pub use api::{AuthApiError, AuthState};
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AuthError};
pub use session_store::SessionStore;
pub use user_store::UserStore;
