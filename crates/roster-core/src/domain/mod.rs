//! # Roster Domain
//!
//! Domain entities and value objects for Roster.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
