/**
 * Authentication Handler Types
 *
 * Request bodies for register and login, their validation, and the response
 * bodies. Missing string fields decode as empty so that they fail with the
 * "is a required field" message instead of a generic decode error.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::Credential;
use crate::shared::SharedError;

/// Upper bound for every string field, in characters
pub const MAX_FIELD_LEN: usize = 255;

/// Lower bound for a new password, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Register request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration fields after normalization and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login fields after normalization and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
}

fn required(field: &str, value: &str) -> Result<(), SharedError> {
    if value.is_empty() {
        return Err(SharedError::validation(field, format!("{field} is a required field")));
    }
    Ok(())
}

fn max_len(field: &str, value: &str) -> Result<(), SharedError> {
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(SharedError::validation(
            field,
            format!("{field} must not be more than {MAX_FIELD_LEN} characters long"),
        ));
    }
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose address check: one `@`, non-empty local part and domain, no
/// whitespace or address-list punctuation.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let forbidden = |c: char| c.is_whitespace() || "<>()[],;:\\\"@".contains(c);

    !local.is_empty()
        && !domain.is_empty()
        && !local.contains(forbidden)
        && !domain.contains(forbidden)
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains("..")
}

impl RegisterRequest {
    /// Normalize and validate, reporting the first broken rule
    pub fn validate(self) -> Result<NewUser, SharedError> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);

        required("name", &name)?;
        max_len("name", &name)?;
        required("email", &email)?;
        max_len("email", &email)?;
        required("password", &self.password)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters long"),
            ));
        }
        max_len("password", &self.password)?;
        required("password_confirmation", &self.password_confirmation)?;
        max_len("password_confirmation", &self.password_confirmation)?;

        if !is_valid_email(&email) {
            return Err(SharedError::validation("email", "email must be a valid email"));
        }
        if self.password != self.password_confirmation {
            return Err(SharedError::validation(
                "password_confirmation",
                "password and password_confirmation do not match",
            ));
        }

        Ok(NewUser {
            name,
            email,
            password: self.password,
        })
    }
}

impl LoginRequest {
    /// Normalize and validate, reporting the first broken rule
    pub fn validate(self) -> Result<LoginAttempt, SharedError> {
        let email = normalize_email(&self.email);

        required("email", &email)?;
        max_len("email", &email)?;
        required("password", &self.password)?;
        max_len("password", &self.password)?;

        Ok(LoginAttempt {
            email,
            password: self.password,
        })
    }
}

/// User response (without the password hash)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Credential> for UserResponse {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            name: credential.name,
            email: credential.email,
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        }
    }
}

/// Plain confirmation message
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
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
