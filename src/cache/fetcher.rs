//! Read-through fetching over the response cache
//!
//! Wraps raw network operations so that a valid cached response short-circuits
//! the network entirely, while misses and stale entries fall through to the
//! supplied fetch operation and refresh the cache on success.

use bytes::Bytes;
use log::debug;
use std::future::Future;
use std::time::Instant;

use super::store::ResponseCache;

/// Applies the cache-or-fetch policy for a single request
///
/// A `CachedFetcher` is a cheap handle over a shared [`ResponseCache`]; each
/// endpoint client holds its own clone and they all see the same entries.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    cache: ResponseCache,
}

impl CachedFetcher {
    /// Creates a fetcher over the given cache
    pub fn new(cache: ResponseCache) -> Self {
        Self { cache }
    }

    /// Returns the underlying cache handle
    #[allow(dead_code)]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Returns the cached payload for `key`, or runs `fetch_op` on a miss
    ///
    /// A valid cache hit never invokes `fetch_op`. On a miss or a stale
    /// entry, `fetch_op` runs; its successful result is stored under `key`
    /// and returned, while a failure propagates untouched and leaves the
    /// key uncached — so the next call retries the network rather than
    /// serving a poisoned entry.
    ///
    /// Two concurrent misses for the same key both invoke their fetch
    /// operation; in-flight requests are not coalesced. The later of the
    /// two stores wins, which is harmless since both carry fresh data.
    pub async fn fetch<F, Fut, E>(&self, key: &str, fetch_op: F) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        if let Some(entry) = self.cache.get(key) {
            if entry.is_valid(Instant::now(), self.cache.ttl()) {
                debug!("cache hit: {}", key);
                return Ok(entry.payload());
            }
        }

        debug!("cache miss: {}", key);
        let payload = fetch_op().await?;
        self.cache.put(key, payload.clone());
        Ok(payload)
    }
}
