//! Bounded cache of resolved path segments.
//!
//! Maps (directory, lowercased segment) to the resolved child path so that
//! repeated lookups of the same segment skip the directory scan. Eviction is
//! by insertion order: the oldest entry is dropped when the cache is full,
//! and lookups do not refresh an entry's position. Entries are never
//! invalidated on filesystem change; staleness is an accepted tradeoff.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

type Key = (PathBuf, String);

/// Hit/miss counters, taken as a snapshot via [`ResolveCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Inner {
    entries: HashMap<Key, PathBuf>,
    order: VecDeque<Key>,
}

/// Shared segment-resolution cache.
///
/// One instance is created at startup and injected into the handler state;
/// tests construct their own independent instances. All operations take a
/// single coarse lock, which is sufficient because each operation is a cheap
/// map access.
pub struct ResolveCache {
    // Mirrored outside the lock so the resolver can skip a disabled cache
    // without contending on the mutex.
    capacity: AtomicUsize,
    inner: Mutex<Inner>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolveCache {
    /// Create a cache holding at most `capacity` entries. Zero disables
    /// caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: AtomicUsize::new(capacity),
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Whether callers should consult the cache at all.
    pub fn is_enabled(&self) -> bool {
        self.capacity.load(Ordering::Relaxed) > 0
    }

    /// Look up the resolved child for `segment_lower` inside `dir`.
    ///
    /// A hit does not promote the entry; insertion order is the sole
    /// eviction signal.
    pub fn get(&self, dir: &Path, segment_lower: &str) -> Option<PathBuf> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let found = inner
            .entries
            .get(&(dir.to_path_buf(), segment_lower.to_owned()))
            .cloned();
        drop(inner);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Record the resolved child for `segment_lower` inside `dir`, evicting
    /// the oldest entry first when the cache is at capacity.
    pub fn put(&self, dir: &Path, segment_lower: &str, child: &Path) {
        let capacity = self.capacity.load(Ordering::Relaxed);
        if capacity == 0 {
            return;
        }
        let key: Key = (dir.to_path_buf(), segment_lower.to_owned());
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(existing) = inner.entries.get_mut(&key) {
            // Two tasks can race to resolve the same segment; the second
            // insert just refreshes the value, not the position.
            *existing = child.to_path_buf();
            return;
        }
        while inner.entries.len() >= capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(key, child.to_path_buf());
    }

    /// Change the maximum entry count at runtime.
    ///
    /// Zero clears the cache and disables it. Shrinking below the current
    /// occupancy evicts the oldest entries down to the new capacity.
    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity, Ordering::Relaxed);
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if capacity == 0 {
            inner.entries.clear();
            inner.order.clear();
            return;
        }
        while inner.entries.len() > capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: usize) -> (PathBuf, String) {
        (PathBuf::from("/srv/www"), format!("seg{n}"))
    }

    #[test]
    fn test_get_returns_inserted_value() {
        let cache = ResolveCache::new(4);
        let (dir, seg) = key(0);
        cache.put(&dir, &seg, Path::new("/srv/www/Seg0"));
        assert_eq!(cache.get(&dir, &seg), Some(PathBuf::from("/srv/www/Seg0")));
    }

    #[test]
    fn test_insertion_order_eviction() {
        let cache = ResolveCache::new(3);
        for n in 0..3 {
            let (dir, seg) = key(n);
            cache.put(&dir, &seg, Path::new("/srv/www/child"));
        }
        // Fourth insert must push out the first-inserted entry only.
        let (dir, seg) = key(3);
        cache.put(&dir, &seg, Path::new("/srv/www/child"));
        assert_eq!(cache.len(), 3);
        let (dir, seg) = key(0);
        assert_eq!(cache.get(&dir, &seg), None);
        let (dir, seg) = key(1);
        assert!(cache.get(&dir, &seg).is_some());
    }

    #[test]
    fn test_get_does_not_refresh_recency() {
        let cache = ResolveCache::new(2);
        for n in 0..2 {
            let (dir, seg) = key(n);
            cache.put(&dir, &seg, Path::new("/srv/www/child"));
        }
        // Touch the oldest entry; it must still be evicted next.
        let (dir, seg) = key(0);
        assert!(cache.get(&dir, &seg).is_some());
        let (dir, seg) = key(2);
        cache.put(&dir, &seg, Path::new("/srv/www/child"));
        let (dir, seg) = key(0);
        assert_eq!(cache.get(&dir, &seg), None);
        let (dir, seg) = key(1);
        assert!(cache.get(&dir, &seg).is_some());
    }

    #[test]
    fn test_zero_capacity_disables_and_clears() {
        let cache = ResolveCache::new(4);
        let (dir, seg) = key(0);
        cache.put(&dir, &seg, Path::new("/srv/www/child"));
        assert_eq!(cache.len(), 1);

        cache.set_capacity(0);
        assert!(!cache.is_enabled());
        assert!(cache.is_empty());

        // Inserts while disabled are dropped.
        cache.put(&dir, &seg, Path::new("/srv/www/child"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shrink_evicts_oldest_down_to_capacity() {
        let cache = ResolveCache::new(4);
        for n in 0..4 {
            let (dir, seg) = key(n);
            cache.put(&dir, &seg, Path::new("/srv/www/child"));
        }
        cache.set_capacity(2);
        assert_eq!(cache.len(), 2);
        for n in 0..2 {
            let (dir, seg) = key(n);
            assert_eq!(cache.get(&dir, &seg), None, "seg{n} should be evicted");
        }
        for n in 2..4 {
            let (dir, seg) = key(n);
            assert!(cache.get(&dir, &seg).is_some(), "seg{n} should survive");
        }
    }

    #[test]
    fn test_duplicate_put_updates_value_in_place() {
        let cache = ResolveCache::new(2);
        let (dir, seg) = key(0);
        cache.put(&dir, &seg, Path::new("/srv/www/old"));
        cache.put(&dir, &seg, Path::new("/srv/www/new"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&dir, &seg), Some(PathBuf::from("/srv/www/new")));
    }

    #[test]
    fn test_stats_count_hits_and_misses() {
        let cache = ResolveCache::new(2);
        let (dir, seg) = key(0);
        assert_eq!(cache.get(&dir, &seg), None);
        cache.put(&dir, &seg, Path::new("/srv/www/child"));
        assert!(cache.get(&dir, &seg).is_some());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
