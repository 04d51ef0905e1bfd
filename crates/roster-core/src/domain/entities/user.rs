//! User entity.

use super::super::value_objects::Email;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

/// User record owned by the record store.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct User {
    /// Unique identifier for the user. Immutable.
    pub id: UserId,

    /// Display name.
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,

    /// User's email address, unique among live records.
    pub email: Email,

    /// Hashed credential (never exposed, never the plaintext).
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "credential must not be empty"))]
    pub password_hash: String,

    /// Record creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly generated ID.
    #[must_use]
    pub fn new(username: String, email: Email, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable contact fields and bumps `updated_at`.
    ///
    /// Identity, credential and creation time are left untouched.
    pub fn change_contact(&mut self, username: String, email: Email) {
        self.username = username;
        self.email = email;
        self.updated_at = Utc::now();
    }
}
