//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{Email, RosterError, RosterResult, User, UserId, ValidateExt};
use roster_repository::UserRepository;
use roster_security::PasswordHasherInterface;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User service backed by a record store and a cache-aside layer.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    /// TTL for entries populated on a read miss.
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl UserServiceImpl {
    /// Creates a new user service with the default cache TTL.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
            cache_ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the TTL applied when a read populates the cache.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Fails with `DuplicateEmail` if a live record other than `owner` holds
    /// the email. Store errors other than `NotFound` propagate.
    ///
    /// Skips hashing for an obvious duplicate; the store repeats the check
    /// atomically on write.
    async fn ensure_email_available(&self, email: &Email, owner: Option<UserId>) -> RosterResult<()> {
        match self.user_repository.find_by_email(email).await {
            Ok(existing) if Some(existing.id) == owner => Ok(()),
            Ok(existing) => {
                debug!("Email {} already held by user {}", email, existing.id);
                Err(RosterError::duplicate_email(email.as_str()))
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Drops the cached copy of a user after a successful store write.
    async fn invalidate(&self, id: UserId) {
        if let Err(e) = self.cache.delete(&cache_keys::user_by_id(id)).await {
            warn!(error = %e, "Failed to invalidate cached user {}", id);
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.username);

        request.validate_request()?;

        let email = Email::new(request.email.as_str())?;
        self.ensure_email_available(&email, None).await?;

        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = User::new(request.username, email, password_hash);
        user.validate_request()?;

        let saved_user = self.user_repository.save(&user).await?;

        // Nothing can be cached under a fresh id yet; kept so every write
        // path ends the same way.
        self.invalidate(saved_user.id).await;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_user_by_id(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        let cache_key = cache_keys::user_by_id(id);

        match self.cache.get::<UserResponse>(&cache_key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for user: {}", id);
                return Ok(cached);
            }
            Ok(None) => debug!("Cache miss for user: {}", id),
            Err(e) => warn!(error = %e, "Cache read failed for user {}, reading store", id),
        }

        let user = self.user_repository.find_by_id(id).await?;
        let response = UserResponse::from(user);

        if let Err(e) = self.cache.set(&cache_key, &response, self.cache_ttl).await {
            warn!(error = %e, "Failed to cache user {}", id);
        }

        Ok(response)
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;
        let email = Email::new(request.email.as_str())?;

        let mut user = self.user_repository.find_by_id(id).await?;

        if user.email != email {
            self.ensure_email_available(&email, Some(id)).await?;
        }

        user.change_contact(request.username, email);
        user.validate_request()?;

        let updated_user = self.user_repository.update(&user).await?;

        self.invalidate(id).await;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        self.user_repository.delete(id).await?;

        self.invalidate(id).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
