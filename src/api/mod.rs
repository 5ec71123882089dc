pub mod json;
pub mod routes;

use serde::{Deserialize, Serialize};

pub use json::JsonBody;
pub use routes::create_router;

/// `{"message": ...}` body used by every successful mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
