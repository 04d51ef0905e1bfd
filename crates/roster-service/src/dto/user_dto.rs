//! User-related DTOs.

use chrono::{DateTime, Utc};
use roster_core::{User, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,

    /// Plaintext credential; hashed before it reaches the store.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl CreateUserRequest {
    /// Builds a request from its three fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Request to replace a user's contact fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,
}

impl UpdateUserRequest {
    /// Builds a request from its two fields.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Public view of a user record. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
