//! JWT Token Handler
//! Mission: Sign session tokens and verify their signatures

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    ttl: Duration,
}

impl JwtHandler {
    pub fn new(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a token for `username` issued at `issued_at`.
    /// Returns the token with its absolute expiration.
    pub fn generate_token(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>)> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?;

        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp().max(0) as usize,
            exp: expires_at.timestamp().max(0) as usize,
            jti: Uuid::new_v4().to_string(),
        };

        debug!(
            "Generating JWT for user {}, expires in {}m",
            username,
            self.ttl.num_minutes()
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")?;

        Ok((token, expires_at))
    }

    /// Verify the signature and decode claims.
    ///
    /// Expiry is not checked here: the session store owns the expiration so an
    /// expired token can be told apart from a forged one.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid token")?;

        Ok(decoded.claims)
    }
}
