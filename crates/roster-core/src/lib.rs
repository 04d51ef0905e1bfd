//! # Roster Core
//!
//! Core types, traits, and error definitions for Roster.
//! This crate provides the domain model and the error vocabulary shared by
//! the repository, cache, and service layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
