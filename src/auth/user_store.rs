//! User Storage
//! Mission: Keep registered accounts in memory with bcrypt-hashed passwords

use crate::auth::models::User;
use crate::validation::MAX_PASSWORD_BYTES;
use anyhow::{bail, Context, Result};
use bcrypt::{hash, verify};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::info;

/// In-memory user table keyed by username
pub struct UserStore {
    users: Mutex<HashMap<String, User>>,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.lock().contains_key(username)
    }

    /// Verify username and password. Unknown users verify as `false`.
    pub fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        // bcrypt would compare only the first 72 bytes
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let password_hash = match self.users.lock().get(username) {
            Some(user) => user.password_hash.clone(),
            None => return Ok(false),
        };

        verify(password, &password_hash).context("Failed to verify password")
    }

    /// Create a new user.
    /// Returns `Ok(None)` when the username is already registered.
    pub fn create_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        if password.len() > MAX_PASSWORD_BYTES {
            bail!("Password exceeds {} bytes", MAX_PASSWORD_BYTES);
        }
        if self.contains(username) {
            return Ok(None);
        }

        // Hash outside the lock; re-check on insert for concurrent registrations
        let password_hash = hash(password, self.bcrypt_cost).context("Failed to hash password")?;

        let user = User {
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        let mut users = self.users.lock();
        if users.contains_key(username) {
            return Ok(None);
        }
        users.insert(user.username.clone(), user.clone());
        drop(users);

        info!("✅ Created user: {}", user.username);

        Ok(Some(user))
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
