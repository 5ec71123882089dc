//! Middleware for observability.
//!
//! Request logging with latency tracking. Session checks live in `auth::middleware`.

pub mod logging;

pub use logging::request_logging;
