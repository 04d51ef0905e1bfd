//! # Roster Service
//!
//! The user service coordinates the record store and the cache layer:
//! reads are cache-aside, writes go to the store and then invalidate the
//! cached copy. The cache never talks to the store itself.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::{UserServiceImpl, UserServiceImplParameters};
pub use user_service::*;
