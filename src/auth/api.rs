//! Authentication API Endpoints
//! Mission: Registration, login and the session-protected profile

use crate::api::json::JsonBody;
use crate::api::MessageResponse;
use crate::auth::{
    jwt::JwtHandler,
    middleware::AuthError,
    models::{Credentials, CredentialsRequest, LoginResponse, ProfileResponse, Session, User},
    session_store::SessionStore,
    user_store::UserStore,
};
use crate::config::Config;
use crate::validation::ValidationErrors;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
    pub sessions: Arc<SessionStore>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(UserStore::new(config.bcrypt_cost)),
            Arc::new(JwtHandler::new(
                config.jwt_secret.clone(),
                config.session_ttl(),
            )),
        )
    }

    /// Store a new credential. Rules are checked before the uniqueness check.
    pub async fn register(&self, request: CredentialsRequest) -> Result<User, AuthApiError> {
        let Credentials { username, password } = request.validate_registration()?;

        // bcrypt is CPU-bound; keep it off the async workers
        let created = tokio::task::spawn_blocking({
            let user_store = self.user_store.clone();
            let username = username.clone();
            move || user_store.create_user(&username, &password)
        })
        .await
        .map_err(|e| anyhow::Error::new(e).context("Registration task failed"))
        .and_then(|result| result)
        .map_err(|e| {
            error!("Failed to create user {}: {:#}", username, e);
            AuthApiError::InternalError
        })?;

        created.ok_or_else(|| {
            warn!("❌ Registration rejected, username taken: {}", username);
            AuthApiError::UserAlreadyExists
        })
    }

    pub async fn login(&self, request: CredentialsRequest) -> Result<Session, AuthApiError> {
        self.login_at(request, Utc::now()).await
    }

    /// Verify credentials and record a session issued at `now`
    pub async fn login_at(
        &self,
        request: CredentialsRequest,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthApiError> {
        let Credentials { username, password } = request.validate_login()?;

        let valid = tokio::task::spawn_blocking({
            let user_store = self.user_store.clone();
            let username = username.clone();
            move || user_store.verify_password(&username, &password)
        })
        .await
        .map_err(|e| anyhow::Error::new(e).context("Verification task failed"))
        .and_then(|result| result)
        .map_err(|e| {
            error!("Password verification failed for {}: {:#}", username, e);
            AuthApiError::InternalError
        })?;

        if !valid {
            warn!("❌ Failed login attempt: {}", username);
            return Err(AuthApiError::InvalidCredentials);
        }

        let (token, expires_at) = self
            .jwt_handler
            .generate_token(&username, now)
            .map_err(|e| {
                error!("Failed to issue token for {}: {:#}", username, e);
                AuthApiError::InternalError
            })?;

        // Recently expired sessions stay so they keep answering 403
        self.sessions.prune_expired(now - self.jwt_handler.ttl());

        let session = Session {
            token,
            username,
            issued_at: now,
            expires_at,
        };
        self.sessions.insert(session.clone());

        info!("✅ Login successful: {}", session.username);

        Ok(session)
    }

    pub fn check_session(&self, token: Option<&str>) -> Result<Session, AuthError> {
        self.check_session_at(token, Utc::now())
    }

    /// 401 for a missing, forged or unknown token; 403 once past the expiration
    pub fn check_session_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;

        let claims = self
            .jwt_handler
            .validate_token(token)
            .map_err(|_| AuthError::InvalidToken)?;

        let Some(session) = self.sessions.get(token) else {
            // Only login signs tokens, so a pruned session still carries a trusted `exp`
            if (claims.exp as i64) < now.timestamp() {
                return Err(AuthError::ExpiredToken);
            }
            return Err(AuthError::InvalidToken);
        };

        if session.is_expired_at(now) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(session)
    }
}

/// Register endpoint - POST /public/register
pub async fn register(
    State(state): State<AuthState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<MessageResponse>, AuthApiError> {
    let user = state.register(payload).await?;
    info!("📝 Registration successful: {}", user.username);
    Ok(Json(MessageResponse::new("Registration successful")))
}

/// Login endpoint - POST /public/login
pub async fn login(
    State(state): State<AuthState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let session = state.login(payload).await?;
    Ok(Json(LoginResponse::from_session(&session)))
}

/// Profile endpoint - GET /private/profile (behind auth middleware)
pub async fn profile(Extension(session): Extension<Session>) -> Json<ProfileResponse> {
    Json(ProfileResponse::from_session(&session))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    Validation(ValidationErrors),
    InvalidCredentials,
    UserAlreadyExists,
    InternalError,
}

impl From<ValidationErrors> for AuthApiError {
    fn from(errors: ValidationErrors) -> Self {
        AuthApiError::Validation(errors)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::Validation(errors) => return errors.into_response(),
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials. Please check your username and password.",
            ),
            AuthApiError::UserAlreadyExists => (StatusCode::CONFLICT, "Invalid username."),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_state() -> AuthState {
        AuthState::new(
            Arc::new(UserStore::new(4)),
            Arc::new(JwtHandler::new(
                "test-secret".to_string(),
                Duration::minutes(30),
            )),
        )
    }

    fn creds(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let state = create_test_state();

        assert!(state.register(creds("alice", "Abcdefg1!")).await.is_ok());
        assert!(matches!(
            state.register(creds("alice", "Abcdefg1!")).await,
            Err(AuthApiError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_register_weak_password_rejected() {
        let state = create_test_state();

        match state.register(creds("alice", "abc")).await {
            Err(AuthApiError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(state.user_store.is_empty());
    }

    #[tokio::test]
    async fn test_register_password_past_bcrypt_limit_rejected() {
        let state = create_test_state();
        let long = format!("Abcdefg1!{}", "x".repeat(70));

        match state.register(creds("alice", &long)).await {
            Err(AuthApiError::Validation(errors)) => {
                assert_eq!(
                    errors.field("password").unwrap(),
                    &["Password must be at most 72 bytes.".to_string()]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(!state.user_store.contains("alice"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = create_test_state();
        state.register(creds("alice", "Abcdefg1!")).await.unwrap();

        assert!(matches!(
            state.login(creds("alice", "Wrong123!")).await,
            Err(AuthApiError::InvalidCredentials)
        ));
        assert!(matches!(
            state.login(creds("bob", "Abcdefg1!")).await,
            Err(AuthApiError::InvalidCredentials)
        ));
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_session_valid_for_thirty_minutes() {
        let state = create_test_state();
        state.register(creds("alice", "Abcdefg1!")).await.unwrap();

        let now = Utc::now();
        let session = state
            .login_at(creds("alice", "Abcdefg1!"), now)
            .await
            .unwrap();
        assert_eq!(session.expires_at - session.issued_at, Duration::minutes(30));

        let token = Some(session.token.as_str());
        let checked = state
            .check_session_at(token, now + Duration::minutes(29))
            .unwrap();
        assert_eq!(checked.username, "alice");

        assert_eq!(
            state
                .check_session_at(token, now + Duration::minutes(31))
                .unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[test]
    fn test_check_session_without_or_with_unknown_token() {
        let state = create_test_state();

        assert_eq!(
            state.check_session(None).unwrap_err(),
            AuthError::MissingToken
        );
        assert_eq!(
            state.check_session(Some("garbage")).unwrap_err(),
            AuthError::InvalidToken
        );

        // Correctly signed but never issued through login
        let (token, _) = state
            .jwt_handler
            .generate_token("mallory", Utc::now())
            .unwrap();
        assert_eq!(
            state.check_session(Some(&token)).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_expired_session_stays_forbidden_after_another_login() {
        let state = create_test_state();
        state.register(creds("alice", "Abcdefg1!")).await.unwrap();
        state.register(creds("bobby", "Abcdefg1!")).await.unwrap();

        let start = Utc::now();
        let alice = state
            .login_at(creds("alice", "Abcdefg1!"), start)
            .await
            .unwrap();

        let later = start + Duration::minutes(31);
        state
            .login_at(creds("bobby", "Abcdefg1!"), later)
            .await
            .unwrap();

        assert_eq!(
            state
                .check_session_at(Some(&alice.token), later)
                .unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[tokio::test]
    async fn test_pruned_session_still_reports_expired() {
        let state = create_test_state();
        state.register(creds("alice", "Abcdefg1!")).await.unwrap();

        let start = Utc::now();
        let first = state
            .login_at(creds("alice", "Abcdefg1!"), start)
            .await
            .unwrap();

        // Past expiry plus one more TTL, so the first session is dropped
        let much_later = start + Duration::hours(2);
        state
            .login_at(creds("alice", "Abcdefg1!"), much_later)
            .await
            .unwrap();
        assert_eq!(state.sessions.len(), 1);

        assert_eq!(
            state
                .check_session_at(Some(&first.token), much_later)
                .unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[test]
    fn test_auth_api_error_responses() {
        let invalid_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid_creds.status(), StatusCode::UNAUTHORIZED);

        let conflict = AuthApiError::UserAlreadyExists.into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let validation = AuthApiError::Validation(ValidationErrors::body("bad")).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }
}
