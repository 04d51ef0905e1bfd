//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use roster_core::{Interface, RosterError, RosterResult};
use shaku::Component;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a password with a fresh random salt.
    fn hash(&self, password: &str) -> RosterResult<String>;

    /// Verifies a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> RosterResult<bool>;
}

/// Argon2id password hasher.
#[derive(Component, Clone)]
#[shaku(interface = PasswordHasherInterface)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Arc::new(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }

    /// Creates a password hasher from a memory cost in MiB.
    pub fn with_cost(cost_mib: u32) -> RosterResult<Self> {
        let params = Params::new(
            cost_mib.saturating_mul(1024), // KiB
            3,                             // iterations
            1,                             // parallelism
            None,
        )
        .map_err(|e| {
            RosterError::Configuration(format!("Invalid password hash cost {}: {}", cost_mib, e))
        })?;

        Ok(Self::with_params(params))
    }

    /// Returns the internal Argon2 instance, for shaku component parameters.
    #[must_use]
    pub fn argon2_arc(&self) -> Arc<Argon2<'static>> {
        Arc::clone(&self.argon2)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("m_cost", &self.argon2.params().m_cost())
            .field("t_cost", &self.argon2.params().t_cost())
            .finish()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> RosterResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| RosterError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> RosterResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| RosterError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(RosterError::Internal(format!(
                "Password verification error: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal memory cost keeps the tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("MySecurePassword123!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "MySecurePassword123!");
        assert!(hasher.verify("MySecurePassword123!", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = hasher();
        let hash1 = hasher.hash("secret").unwrap();
        let hash2 = hasher.hash("secret").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("secret", &hash1).unwrap());
        assert!(hasher.verify("secret", &hash2).unwrap());
    }

    #[test]
    fn test_invalid_hash_format_returns_error() {
        let result = hasher().verify("password", "not-a-valid-hash");
        assert!(matches!(result, Err(RosterError::Internal(_))));
    }

    #[test]
    fn test_zero_cost_is_rejected() {
        assert!(matches!(
            PasswordHasher::with_cost(0),
            Err(RosterError::Configuration(_))
        ));
    }

    #[test]
    fn test_hasher_debug_shows_params_only() {
        let debug_str = format!("{:?}", hasher());
        assert!(debug_str.contains("PasswordHasher"));
        assert!(debug_str.contains("m_cost: 1024"));
    }
}
