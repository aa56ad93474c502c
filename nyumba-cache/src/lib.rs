//! Bounded TTL cache for the nyumba client.
//!
//! A small in-memory cache with two bounds: entries expire after a
//! time-to-live, and the entry count never exceeds a fixed capacity
//! (least-recently-used entries are evicted first). Values never
//! outlive their TTL even if the capacity bound alone would keep them.
//!
//! The cache is plain owned state with no interior locking or global
//! instance; whichever component needs one holds its own. Time comes
//! from an injected [`Clock`], so expiry is testable without sleeping.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A bounded cache whose entries expire after a fixed TTL.
///
/// `get` refreshes an entry's recency but never its expiry: a value
/// that keeps being read still goes stale once its TTL passes.
pub struct TtlCache<K, V> {
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: HashMap<K, Entry<V>>,
    /// Keys in recency order, least recently used at the front.
    /// Invariant: holds exactly the keys present in `entries`.
    recency: VecDeque<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache on the system clock.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    /// Creates a cache on an injected clock.
    #[must_use]
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            capacity,
            ttl,
            clock,
            entries: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    /// Inserts a value, replacing any existing entry for the key.
    ///
    /// At capacity, expired entries are purged first; if the cache is
    /// still full, the least recently used entry is evicted. A zero
    /// capacity means the cache never stores anything.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired();
            if self.entries.len() >= self.capacity {
                self.evict_lru();
            }
        }

        let expires_at = self.clock.now() + self.ttl;
        self.entries.insert(key.clone(), Entry { value, expires_at });
        self.touch(&key);
    }

    /// Looks up a value, refreshing its recency.
    ///
    /// An expired entry is removed and reported absent.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if entry.expires_at <= now => {
                self.entries.remove(key);
                self.forget(key);
                None
            }
            Some(_) => {
                self.touch(key);
                self.entries.get(key).map(|entry| &entry.value)
            }
            None => None,
        }
    }

    /// Removes an entry, returning its value if it was present and
    /// not expired.
    pub fn evict(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.forget(key);
        if entry.expires_at <= self.clock.now() {
            return None;
        }
        Some(entry.value)
    }

    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let entries = &self.entries;
        self.recency.retain(|key| entries.contains_key(key));
        before - self.entries.len()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// True if no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the key has a live entry.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > now)
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// The capacity bound this cache was created with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_lru(&mut self) {
        if let Some(oldest) = self.recency.pop_front() {
            self.entries.remove(&oldest);
            debug!("cache full, evicted least recently used entry");
        }
    }

    fn touch(&mut self, key: &K) {
        self.forget(key);
        self.recency.push_back(key.clone());
    }

    fn forget(&mut self, key: &K) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
        }
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
