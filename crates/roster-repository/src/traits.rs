//! Repository trait definitions.

use roster_core::{Email, Interface, RosterResult, User, UserId};
use async_trait::async_trait;

/// User record store.
///
/// Lookups, updates and deletes of a missing identity fail with
/// [`RosterError::NotFound`](roster_core::RosterError::NotFound); any other
/// failure surfaces as [`RosterError::Store`](roster_core::RosterError::Store).
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts or overwrites the record at its identity key.
    ///
    /// Fails with `DuplicateEmail` if a record with another identity holds
    /// the email. The check and the write are one atomic step.
    async fn save(&self, user: &User) -> RosterResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Finds the first live user holding this email.
    async fn find_by_email(&self, email: &Email) -> RosterResult<User>;

    /// Overwrites an existing user. Email uniqueness is enforced as in
    /// [`save`](Self::save).
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Deletes a user by ID.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Counts all live users.
    async fn count(&self) -> RosterResult<u64>;
}
