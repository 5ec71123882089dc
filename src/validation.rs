//! Input Validation
//! Mission: Check usernames, passwords and required fields, reporting every violated rule

use serde::Serialize;
use std::collections::BTreeMap;

pub const MIN_USERNAME_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 8;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Symbols accepted by the special-character password rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MISSING_FIELD: &str = "Missing data for required field.";

/// Field name used for errors that concern the request body as a whole
pub const BODY_FIELD: &str = "_body";

/// Violations grouped per field, serialized as `{"field": ["msg", ...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single error against the whole body (malformed JSON, wrong content type)
    pub fn body(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(BODY_FIELD, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn extend<I, M>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        for message in messages {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of violations across all fields
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Every password rule the value breaks, in rule order
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        violations.push("Password must be at least 8 characters");
    }
    if !password.chars().any(char::is_uppercase) {
        violations.push("Password must have at least one capital letter.");
    }
    if !password.chars().any(char::is_lowercase) {
        violations.push("Password must contain at least lowercase letter.");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push("Password must have at least one special character.");
    }
    if password.len() > MAX_PASSWORD_BYTES {
        violations.push("Password must be at most 72 bytes.");
    }

    violations
}

pub fn username_violations(username: &str) -> Vec<String> {
    if username.chars().count() < MIN_USERNAME_LEN {
        vec![format!("Shorter than minimum length {}.", MIN_USERNAME_LEN)]
    } else {
        Vec::new()
    }
}

/// Unwrap a required field, recording a violation when it is absent
pub fn require<T>(errors: &mut ValidationErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, MISSING_FIELD);
    }
    value
}
