//! Caching infrastructure for the service layer.
//!
//! An in-process TTL cache behind [`CacheInterface`], plus a background
//! sweeper that bounds how long expired entries stay in memory.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod sweeper;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{InMemoryCacheService, InMemoryCacheServiceParameters, DEFAULT_TTL};
pub use sweeper::CacheSweeper;
