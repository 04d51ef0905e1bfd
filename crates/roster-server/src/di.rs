//! Dependency injection module using Shaku.
//!
//! `RosterModule` holds the whole single-process stack: the record store,
//! the credential hasher, the TTL cache, and the user service on top.

use roster_config::RosterConfig;
use roster_core::RosterResult;
use roster_repository::{InMemoryUserRepository, UserRepository};
use roster_security::{PasswordHasher, PasswordHasherInterface, PasswordHasherParameters};
use roster_service::{
    CacheInterface, InMemoryCacheService, InMemoryCacheServiceParameters, UserService,
    UserServiceImpl, UserServiceImplParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub RosterModule {
        components = [
            InMemoryUserRepository,
            PasswordHasher,
            InMemoryCacheService,
            UserServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the module from configuration.
///
/// Fails with `Configuration` if the hash cost is out of range.
pub fn build_module(config: &RosterConfig) -> RosterResult<Arc<RosterModule>> {
    let password_hasher = PasswordHasher::with_cost(config.security.password_hash_cost)?;

    let module = RosterModule::builder()
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .with_component_parameters::<InMemoryCacheService>(InMemoryCacheServiceParameters {
            enabled: config.cache.enabled,
            ..Default::default()
        })
        .with_component_parameters::<UserServiceImpl>(UserServiceImplParameters {
            cache_ttl: config.cache.default_ttl(),
        })
        .build();

    info!(
        cache_enabled = config.cache.enabled,
        cache_ttl_secs = config.cache.default_ttl_secs,
        hash_cost_mib = config.security.password_hash_cost,
        "Dependency module built"
    );

    Ok(Arc::new(module))
}

/// Resolves the components a caller of the module needs.
pub trait RosterResolver {
    /// Resolves the user service.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// Resolves the record store.
    fn user_repository(&self) -> Arc<dyn UserRepository>;

    /// Resolves the cache layer.
    fn cache(&self) -> Arc<dyn CacheInterface>;

    /// Resolves the credential hasher.
    fn password_hasher(&self) -> Arc<dyn PasswordHasherInterface>;
}

impl RosterResolver for RosterModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn password_hasher(&self) -> Arc<dyn PasswordHasherInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::RosterError;
    use roster_service::{CreateUserRequest, CacheExt};

    fn test_config() -> RosterConfig {
        let mut config = RosterConfig::default();
        config.security.password_hash_cost = 1;
        config
    }

    #[test]
    fn test_has_component_trait_bounds() {
        fn _assert_has_user_service<T: HasComponent<dyn UserService>>() {}
        fn _assert_has_user_repository<T: HasComponent<dyn UserRepository>>() {}
        fn _assert_has_cache<T: HasComponent<dyn CacheInterface>>() {}
        fn _assert_has_password_hasher<T: HasComponent<dyn PasswordHasherInterface>>() {}

        _assert_has_user_service::<RosterModule>();
        _assert_has_user_repository::<RosterModule>();
        _assert_has_cache::<RosterModule>();
        _assert_has_password_hasher::<RosterModule>();
    }

    #[test]
    fn test_invalid_hash_cost_fails_build() {
        let mut config = test_config();
        config.security.password_hash_cost = 0;

        assert!(matches!(
            build_module(&config),
            Err(RosterError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_service_shares_store_and_cache_with_module() {
        let module = build_module(&test_config()).unwrap();
        let service = module.user_service();

        let created = service
            .create_user(CreateUserRequest::new("alice", "a@x.com", "pw"))
            .await
            .unwrap();
        service.get_user_by_id(created.id).await.unwrap();

        assert_eq!(module.user_repository().count().await.unwrap(), 1);

        let cached: Option<roster_service::UserResponse> = module
            .cache()
            .get(&roster_service::cache_keys::user_by_id(created.id))
            .await
            .unwrap();
        assert_eq!(cached, Some(created));
    }

    #[tokio::test]
    async fn test_disabled_cache_is_wired_through() {
        let mut config = test_config();
        config.cache.enabled = false;
        let module = build_module(&config).unwrap();

        assert!(!module.cache().is_enabled());
        assert!(module.user_service().get_user_by_id(roster_core::UserId::new()).await.is_err());
    }

    #[test]
    fn test_hasher_uses_configured_cost() {
        let module = build_module(&test_config()).unwrap();
        let hasher = module.password_hasher();

        let hash = hasher.hash("pw").unwrap();
        assert!(hash.contains("m=1024"));
        assert!(hasher.verify("pw", &hash).unwrap());
    }
}
