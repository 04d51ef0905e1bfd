//! `InMemoryUserRepository` — HashMap-backed record store.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{Email, RosterError, RosterResult, User, UserId};
use shaku::Component;
use std::collections::HashMap;
use tracing::debug;

const RESOURCE: &str = "User";

/// Record store keeping every live user in process memory.
///
/// One reader/writer lock guards the whole map: `find_*` and `count` share
/// it, `save`/`update`/`delete` hold it exclusively. `save` and `update`
/// check email uniqueness under that exclusive guard, so no interleaving of
/// writers can leave two live records sharing an email. Guards are dropped
/// before each method returns.
#[derive(Component, Default)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: RwLock::new(map),
        }
    }
}

/// Fails with `DuplicateEmail` if a record other than `user` holds its email.
fn ensure_email_free(users: &HashMap<UserId, User>, user: &User) -> RosterResult<()> {
    match users
        .values()
        .find(|other| other.id != user.id && other.email == user.email)
    {
        Some(holder) => {
            debug!("Repository: email {} already held by {}", user.email, holder.id);
            Err(RosterError::duplicate_email(user.email.as_str()))
        }
        None => Ok(()),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> RosterResult<User> {
        debug!("Repository: save {}", user.id);
        let mut users = self.users.write();
        ensure_email_free(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Repository: find_by_id {}", id);
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| RosterError::not_found(RESOURCE, id))
    }

    // Linear scan; there is no secondary email index.
    async fn find_by_email(&self, email: &Email) -> RosterResult<User> {
        debug!("Repository: find_by_email {}", email);
        self.users
            .read()
            .values()
            .find(|user| user.email == *email)
            .cloned()
            .ok_or_else(|| RosterError::not_found(RESOURCE, email))
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        debug!("Repository: update {}", user.id);
        let mut users = self.users.write();
        if !users.contains_key(&user.id) {
            return Err(RosterError::not_found(RESOURCE, user.id));
        }
        ensure_email_free(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Repository: delete {}", id);
        self.users
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RosterError::not_found(RESOURCE, id))
    }

    async fn count(&self) -> RosterResult<u64> {
        Ok(self.users.read().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn create_test_user(username: &str, email: &str) -> User {
        User::new(
            username.to_string(),
            Email::new(email).unwrap(),
            "hashed_password".to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("testuser", "test@example.com");

        let saved = repo.save(&user).await.unwrap();
        assert_eq!(saved.id, user.id);

        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found.username, "testuser");
        assert_eq!(found.email.as_str(), "test@example.com");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_key() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("first", "test@example.com");
        repo.save(&user).await.unwrap();

        user.username = "second".to_string();
        repo.save(&user).await.unwrap();

        assert_eq!(repo.find_by_id(user.id).await.unwrap().username, "second");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_email_held_by_other_record() {
        let first = create_test_user("first", "shared@example.com");
        let repo = InMemoryUserRepository::with_users(vec![first.clone()]);

        let second = create_test_user("second", "Shared@Example.com");
        let err = repo.save(&second).await.unwrap_err();

        assert!(matches!(err, RosterError::DuplicateEmail(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_id(second.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_rejects_email_held_by_other_record() {
        let first = create_test_user("first", "first@example.com");
        let mut second = create_test_user("second", "second@example.com");
        let repo = InMemoryUserRepository::with_users(vec![first.clone(), second.clone()]);

        second.change_contact("second".to_string(), first.email.clone());
        let err = repo.update(&second).await.unwrap_err();

        assert!(matches!(err, RosterError::DuplicateEmail(_)));
        assert_eq!(
            repo.find_by_id(second.id).await.unwrap().email.as_str(),
            "second@example.com"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_saves_of_one_email_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let user = create_test_user(&format!("user{i}"), "same@example.com");
                repo.save(&user).await
            }));
        }

        let mut saved = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => saved += 1,
                Err(e) => assert!(matches!(e, RosterError::DuplicateEmail(_)), "got {e:?}"),
            }
        }

        assert_eq!(saved, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.find_by_id(UserId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let user = create_test_user("testuser", "test@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);

        let found = repo
            .find_by_email(&Email::new("TEST@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.id, user.id);

        let err = repo
            .find_by_email(&Email::new("other@example.com").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_existing() {
        let mut user = create_test_user("testuser", "test@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);

        user.change_contact("renamed".to_string(), Email::new("new@example.com").unwrap());
        repo.update(&user).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found.username, "renamed");
        assert_eq!(found.email.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_fails_and_does_not_insert() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("ghost", "ghost@example.com");

        let err = repo.update(&user).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let user = create_test_user("testuser", "test@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);

        repo.delete(user.id).await.unwrap();
        assert!(repo.find_by_id(user.id).await.unwrap_err().is_not_found());
        assert!(repo.delete(user.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut handles = Vec::new();

        for i in 0..50 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let user = create_test_user(&format!("user{i}"), &format!("user{i}@example.com"));
                repo.save(&user).await.unwrap();
                let found = repo.find_by_id(user.id).await.unwrap();
                assert_eq!(found.email, user.email);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 50);
    }
}
