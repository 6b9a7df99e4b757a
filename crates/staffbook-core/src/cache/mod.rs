//! Local cache of the last-known employee list and the last mutation.
//!
//! The cache is display-only and never authoritative. Each slot is one JSON
//! file, overwritten whole:
//! - `employees.json` after every successful list fetch
//! - `lastAction.json` after every successful create, update, or delete

pub mod manager;

pub use manager::{CacheManager, CachedData};
