//! # Roster Security
//!
//! Credential hashing. Plaintext credentials are hashed once at creation
//! and never stored.

pub mod password;

pub use password::*;
