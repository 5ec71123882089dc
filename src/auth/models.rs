//! Authentication Models
//! Mission: Define user, session and credential data structures

use crate::validation::{self, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub created_at: DateTime<Utc>,
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // username
    pub iat: usize,
    pub exp: usize,
    pub jti: String, // unique per login
}

/// Server-side record of an issued token
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip_serializing)]
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Expired once `now` is strictly past the stored expiration
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Body of `/public/register` and `/public/login`; fields stay optional so
/// a missing one is reported as a validation error rather than a parse error
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Registration rules: both fields present, username and password rules met
    pub fn validate_registration(self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = validation::require(&mut errors, "username", self.username);
        let password = validation::require(&mut errors, "password", self.password);

        if let Some(username) = &username {
            errors.extend("username", validation::username_violations(username));
        }
        if let Some(password) = &password {
            errors.extend("password", validation::password_violations(password));
        }

        match (username, password) {
            (Some(username), Some(password)) => {
                errors.into_result(Credentials { username, password })
            }
            _ => Err(errors),
        }
    }

    /// Login only needs both fields present
    pub fn validate_login(self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = validation::require(&mut errors, "username", self.username);
        let password = validation::require(&mut errors, "password", self.password);

        match (username, password) {
            (Some(username), Some(password)) => {
                errors.into_result(Credentials { username, password })
            }
            _ => Err(errors),
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64, // seconds until expiration
    pub expires_at: DateTime<Utc>,
}

impl LoginResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            message: "Login successful".to_string(),
            access_token: session.token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: session.seconds_remaining(session.issued_at),
            expires_at: session.expires_at,
        }
    }
}

/// Profile response (token echoed back, as the session holder sees it)
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub access_token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            access_token: session.token.clone(),
            username: session.username.clone(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}
