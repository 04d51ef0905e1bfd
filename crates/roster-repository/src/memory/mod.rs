//! In-process record store.

mod user_repository;

pub use user_repository::InMemoryUserRepository;
