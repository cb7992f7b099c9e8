//! Time-bounded response caching.
//!
//! The client only talks to the cache through the [`ResponseCache`] trait, so
//! the in-memory implementation can be swapped for [`NoCache`] (or anything
//! else) without touching request logic.
//!
//! # Expiry
//!
//! [`MemoryCache`] expires entries in two ways:
//!
//! - lazily, when an expired entry is looked up;
//! - periodically, through a background sweep task that runs every
//!   `check_period` when the cache is created inside a tokio runtime.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use lookout_sentry::{ApiRequest, MemoryCache, ResponseCache};
//! use reqwest::Method;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = MemoryCache::default();
//! let key = ApiRequest::new(Method::GET, "https://sentry.io/api/0/projects/").cache_key();
//!
//! cache.put(key.clone(), serde_json::json!([]), Duration::from_secs(300));
//! assert_eq!(cache.get(&key), Some(serde_json::json!([])));
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::request::CacheKey;

/// Default time-to-live for cached responses (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default interval between expiry sweeps (1 minute).
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(60);

/// Longest interval between expiry sweeps; longer periods are clamped.
const MAX_CHECK_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Storage for successful response bodies, keyed by request fingerprint.
///
/// Implementations must be safe to share between concurrent requests. When
/// two writers race on the same key, the last `put` wins.
pub trait ResponseCache: Send + Sync + fmt::Debug {
    /// Returns the cached body for `key`, if present and not expired.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Stores `value` under `key` for `ttl`.
    fn put(&self, key: CacheKey, value: Value, ttl: Duration);

    /// The TTL applied to responses stored by the client.
    fn default_ttl(&self) -> Duration;

    /// Removes every expired entry, returning how many were removed.
    fn purge_expired(&self) -> usize;

    /// Removes every entry.
    fn clear(&self);

    /// Returns the number of stored entries, expired or not.
    fn len(&self) -> usize;

    /// Returns whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

type Entries = DashMap<CacheKey, CacheEntry>;

/// In-memory [`ResponseCache`] with lazy and periodic expiry.
///
/// Entries live in a [`DashMap`], so concurrent readers never observe a
/// partially written entry. Nothing is persisted across process restarts.
pub struct MemoryCache {
    entries: Arc<Entries>,
    default_ttl: Duration,
    sweeper: Option<JoinHandle<()>>,
}

impl MemoryCache {
    /// Creates a cache with the given default TTL and sweep period.
    ///
    /// The periodic sweep only starts when called from within a tokio
    /// runtime; otherwise expired entries are still dropped lazily on lookup.
    /// A zero `check_period` disables the sweep. A TTL too large to
    /// represent as a deadline (e.g. [`Duration::MAX`]) never expires.
    #[must_use]
    pub fn new(default_ttl: Duration, check_period: Duration) -> Self {
        let entries = Arc::new(Entries::new());
        let sweeper = if check_period.is_zero() {
            None
        } else {
            spawn_sweeper(Arc::downgrade(&entries), check_period)
        };

        Self {
            entries,
            default_ttl,
            sweeper,
        }
    }

    /// Returns whether a background sweep task is running for this cache.
    #[must_use]
    pub fn has_sweeper(&self) -> bool {
        self.sweeper.is_some()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CHECK_PERIOD)
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.len())
            .field("default_ttl", &self.default_ttl)
            .field("sweeper", &self.sweeper.is_some())
            .finish()
    }
}

impl Drop for MemoryCache {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.abort();
        }
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                trace!(%key, "cache hit");
                return Some(entry.value.clone());
            }
        } else {
            trace!(%key, "cache miss");
            return None;
        }

        // Re-check under the write lock: a concurrent put may have refreshed it
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        debug!(%key, "cache entry expired");
        None
    }

    fn put(&self, key: CacheKey, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        debug!(%key, ttl_secs = ttl.as_secs(), "storing response in cache");
        self.entries.insert(key, entry);
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn purge_expired(&self) -> usize {
        purge(&self.entries)
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn purge(entries: &Entries) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    before.saturating_sub(entries.len())
}

fn spawn_sweeper(entries: Weak<Entries>, period: Duration) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!("no tokio runtime available, cache expiry will be lazy only");
        return None;
    };

    let period = period.min(MAX_CHECK_PERIOD);
    let handle = runtime.spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(entries) = entries.upgrade() else {
                break;
            };
            let removed = purge(&entries);
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    });
    Some(handle)
}

/// A [`ResponseCache`] that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<Value> {
        None
    }

    fn put(&self, _key: CacheKey, _value: Value, _ttl: Duration) {}

    fn default_ttl(&self) -> Duration {
        Duration::ZERO
    }

    fn purge_expired(&self) -> usize {
        0
    }

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}
