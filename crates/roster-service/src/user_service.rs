//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};

/// User service trait.
///
/// The only coordinator between the record store and the cache: reads are
/// cache-aside, writes hit the store first and then invalidate the cached
/// copy. Dropping a returned future cancels the call.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user with a fresh identity.
    ///
    /// Fails with `InvalidInput` on an empty or malformed field and with
    /// `DuplicateEmail` if a live record already holds the email.
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Gets a user by ID, from the cache when possible.
    async fn get_user_by_id(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Replaces a user's username and email.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;
}
