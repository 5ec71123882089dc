//! Authentication Middleware
//! Mission: Protect private and employee endpoints with session checks

use crate::auth::api::AuthState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Auth middleware that validates the session token
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(&req);

    let session = auth.check_session(token.as_deref())?;

    // Handlers read the session back through `Extension<Session>`
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Token from the `token` query parameter or an `Authorization: Bearer` header
pub fn extract_token(req: &Request) -> Option<String> {
    let token_from_query = req.uri().query().and_then(|query| {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("token="))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
    });

    let token_from_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    token_from_query.or(token_from_header)
}

/// Auth error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Authentication token not found. Please log in.",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            AuthError::ExpiredToken => (
                StatusCode::FORBIDDEN,
                "Session expired. Please log in again.",
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
