//! Keyed response store with TTL-based staleness
//!
//! Provides a `ResponseCache` that maps request URLs to raw response bytes
//! with a creation timestamp. Validity is evaluated lazily on read against
//! a fixed TTL; nothing is evicted in place, stale entries simply stop
//! being treated as hits until a fresh fetch overwrites them.

use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time a cached response stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A single cached response
///
/// Immutable once created: the payload and creation time never change.
/// Staleness is a pure function of the current time and the cache's TTL,
/// answered by [`CacheEntry::is_valid`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Raw response bytes as received from the network
    payload: Bytes,
    /// When this entry was stored
    created_at: Instant,
}

impl CacheEntry {
    fn new(payload: Bytes) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    /// Returns the cached payload
    ///
    /// `Bytes` clones are reference-counted, so this does not copy the body.
    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }

    /// Returns true while the entry is younger than `ttl` at time `now`
    pub fn is_valid(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.created_at) < ttl
    }
}

/// Thread-safe response cache keyed by request URL
///
/// Cloning a `ResponseCache` yields another handle to the same underlying
/// map, so a single cache can be shared across every endpoint client.
/// Each instance is independent — there is no global singleton, which
/// keeps tests isolated from each other.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    /// Shared map of request key to cached entry
    entries: Arc<DashMap<String, CacheEntry>>,
    /// How long an entry counts as a hit
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Creates an empty cache with [`DEFAULT_TTL`]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl: DEFAULT_TTL,
        }
    }

    /// Creates an empty cache with a custom TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the TTL applied to entries in this cache
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored entry for `key`, valid or not
    ///
    /// The validity check is deliberately left to the caller (the cached
    /// fetcher applies it), so the store itself never interprets time.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Stores `payload` under `key`, replacing any prior entry
    ///
    /// The entry's creation time is taken at the moment of insertion.
    /// Replacement is atomic with respect to concurrent `get` calls on the
    /// same key: readers observe either the old or the new entry, never a
    /// mix of the two.
    pub fn put(&self, key: &str, payload: Bytes) {
        self.entries.insert(key.to_string(), CacheEntry::new(payload));
    }

    /// Removes every entry, regardless of TTL state
    ///
    /// The next access for any previously cached key behaves as a miss.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Returns the number of stored entries (valid and stale alike)
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries are stored
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
