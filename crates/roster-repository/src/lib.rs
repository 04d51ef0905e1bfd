//! # Roster Repository
//!
//! The record store: the single source of truth for user records.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! InMemoryUserRepository        (HashMap behind one reader/writer lock)
//! ```
//!
//! Reads take the shared lock, writes take the exclusive lock, and no lock
//! is ever held across an `.await`.

pub mod memory;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use traits::*;
