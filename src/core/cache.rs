//! Time-boxed in-memory caches.
//!
//! Each data class (player catalog, league data, projections/stats) owns its
//! own [`TtlCache`] with its own validity duration. Entries are written whole
//! and never patched; a refresh replaces the entry. Storage is an LRU map so a
//! long-running process cannot grow a class without bound.

use lru::LruCache;
use serde::Serialize;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::time::Instant;
use tracing::debug;

/// Validity duration of the player catalog class.
pub const PLAYER_CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Validity duration of league rosters, users, settings and matchups.
pub const LEAGUE_TTL: Duration = Duration::from_secs(5 * 60);
/// Validity duration of projection and stat payloads.
pub const PROJECTION_TTL: Duration = Duration::from_secs(30 * 60);

/// Durations for every cache class, overridable for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDurations {
    pub player_catalog: Duration,
    pub league: Duration,
    pub projections: Duration,
}

impl Default for CacheDurations {
    fn default() -> Self {
        Self {
            player_catalog: PLAYER_CATALOG_TTL,
            league: LEAGUE_TTL,
            projections: PROJECTION_TTL,
        }
    }
}

/// One stored value and the instant it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub timestamp: Instant,
}

impl<V> CacheEntry<V> {
    fn new(data: V) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }

    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Keyed store whose entries expire `ttl` after they were written.
///
/// Clones share storage, so one instance can be handed to every accessor of
/// its data class.
pub struct TtlCache<K, V>
where
    K: Hash + Eq,
{
    name: &'static str,
    ttl: Duration,
    entries: Arc<Mutex<LruCache<K, CacheEntry<V>>>>,
}

impl<K, V> Clone for TtlCache<K, V>
where
    K: Hash + Eq,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ttl: self.ttl,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Create a cache holding at most `capacity` keys (clamped to at least 1).
    pub fn new(name: &'static str, ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            ttl,
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, CacheEntry<V>>> {
        // A poisoned lock only means another thread panicked mid-write of a
        // whole entry; the map itself is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the stored value while it is younger than the cache's duration.
    ///
    /// Expired entries are evicted on read.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        let hit = match entries.get(key) {
            Some(entry) if entry.is_valid(self.ttl) => Some(entry.data.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        };
        debug!(cache = self.name, ?key, hit = hit.is_some(), "cache lookup");
        hit
    }

    /// Store `data` under `key`, replacing any previous entry wholesale.
    pub fn put(&self, key: K, data: V) {
        self.lock().put(key, CacheEntry::new(data));
    }

    pub fn invalidate(&self, key: &K) {
        self.lock().pop(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
        debug!(cache = self.name, "cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Age and validity summary for the administration surface.
    pub fn status(&self) -> CacheClassStatus {
        let entries = self.lock();
        let valid_entries = entries.iter().filter(|(_, e)| e.is_valid(self.ttl)).count();
        let newest_age = entries.iter().map(|(_, e)| e.age()).min();

        CacheClassStatus {
            name: self.name.to_string(),
            ttl_secs: self.ttl.as_secs(),
            entries: entries.len(),
            valid_entries,
            newest_age_secs: newest_age.map(|a| a.as_secs()),
            remaining_secs: newest_age.map(|a| self.ttl.saturating_sub(a).as_secs()),
        }
    }
}

/// Snapshot of one cache class, as reported by the cache status surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheClassStatus {
    pub name: String,
    pub ttl_secs: u64,
    pub entries: usize,
    pub valid_entries: usize,
    pub newest_age_secs: Option<u64>,
    pub remaining_secs: Option<u64>,
}

impl CacheClassStatus {
    /// A class is valid when it holds at least one unexpired entry.
    pub fn is_valid(&self) -> bool {
        self.valid_entries > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl_secs: u64) -> TtlCache<String, u32> {
        TtlCache::new("test", Duration::from_secs(ttl_secs), 8)
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_after_put_within_duration() {
        let cache = cache(60);
        cache.put("a".to_string(), 7);

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&"a".to_string()), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_miss_once_duration_elapses() {
        let cache = cache(60);
        cache.put("a".to_string(), 7);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get(&"a".to_string()), None);
        // Expired entries are evicted on read
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_replaces_and_resets_timestamp() {
        let cache = cache(60);
        cache.put("a".to_string(), 1);
        tokio::time::advance(Duration::from_secs(50)).await;
        cache.put("a".to_string(), 2);
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(cache.get(&"a".to_string()), Some(2));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = cache(60);
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);

        cache.invalidate(&"a".to_string());
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = cache(60);
        let other = cache.clone();
        cache.put("a".to_string(), 1);
        assert_eq!(other.get(&"a".to_string()), Some(1));
    }

    #[test]
    fn test_independent_instances_do_not_share() {
        let first = cache(60);
        let second = cache(60);
        first.put("a".to_string(), 1);
        assert_eq!(second.get(&"a".to_string()), None);
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache: TtlCache<u8, u8> = TtlCache::new("tiny", Duration::from_secs(60), 2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_age_and_remaining() {
        let cache = cache(60);
        let empty = cache.status();
        assert!(!empty.is_valid());
        assert_eq!(empty.newest_age_secs, None);

        cache.put("a".to_string(), 1);
        tokio::time::advance(Duration::from_secs(20)).await;

        let status = cache.status();
        assert_eq!(status.name, "test");
        assert_eq!(status.entries, 1);
        assert_eq!(status.valid_entries, 1);
        assert_eq!(status.newest_age_secs, Some(20));
        assert_eq!(status.remaining_secs, Some(40));
        assert!(status.is_valid());
    }
}
