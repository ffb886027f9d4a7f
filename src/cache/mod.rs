//! In-memory response cache with TTL expiry
//!
//! This module provides a thread-safe, process-lifetime cache for raw API
//! responses keyed by request URL, plus a read-through fetcher that wraps
//! raw network operations with it. Entries become logically stale after a
//! fixed TTL but are only discarded when overwritten by a fresh fetch or
//! when the whole cache is invalidated.

mod fetcher;
mod store;

pub use fetcher::CachedFetcher;
pub use store::{CacheEntry, ResponseCache, DEFAULT_TTL};
