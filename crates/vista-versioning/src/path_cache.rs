//! Bounded LRU cache for path conversion results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::debug;
use vista_gmod::GmodPath;
use vista_types::VisVersion;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PathConversionKey {
    source: VisVersion,
    target: VisVersion,
    path: String,
}

#[derive(Debug)]
struct CacheEntry {
    key: PathConversionKey,
    value: Option<GmodPath>,
}

#[derive(Default)]
struct CacheState {
    map: HashMap<PathConversionKey, usize>,
    entries: Vec<Option<CacheEntry>>,
    order: crate::lru::LruList,
}

/// Cache performance counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub hit_ratio: f64,
    pub size: usize,
}

/// Thread-safe LRU cache keyed by `(source version, target version,
/// path string)`.
///
/// Stores the conversion *outcome*, so negative results (`None`) are
/// cached too. All structural state mutates under one mutex; the
/// counters are atomics so [`Self::stats`] reads stay cheap.
pub struct PathConversionCache {
    state: Mutex<CacheState>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl PathConversionCache {
    /// Entry bound; the least recently used entry is evicted beyond it.
    pub const MAX_CACHE_SIZE: usize = 10_000;

    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// The cached outcome for the conversion, if present.
    ///
    /// A hit promotes the entry to most recently used and returns the
    /// stored optional; `None` means the conversion has not been cached.
    pub fn try_get(
        &self,
        source: VisVersion,
        target: VisVersion,
        path: &str,
    ) -> Option<Option<GmodPath>> {
        let key = PathConversionKey {
            source,
            target,
            path: path.to_string(),
        };

        let mut state = self.state.lock();
        let Some(&slot) = state.map.get(&key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        state.order.touch(slot);
        let value = state.entries[slot]
            .as_ref()
            .expect("mapped slot is occupied")
            .value
            .clone();
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(value)
    }

    /// Stores a conversion outcome, updating and promoting an existing
    /// entry, or evicting the tail when at capacity.
    pub fn put(
        &self,
        source: VisVersion,
        target: VisVersion,
        path: &str,
        result: Option<GmodPath>,
    ) {
        let key = PathConversionKey {
            source,
            target,
            path: path.to_string(),
        };

        let mut state = self.state.lock();
        if let Some(&slot) = state.map.get(&key) {
            state.order.touch(slot);
            state.entries[slot]
                .as_mut()
                .expect("mapped slot is occupied")
                .value = result;
            return;
        }

        if state.map.len() >= Self::MAX_CACHE_SIZE {
            if let Some(evicted) = state.order.evict_tail() {
                if let Some(entry) = state.entries[evicted].take() {
                    debug!(path = %entry.key.path, "evicting least recently used conversion");
                    state.map.remove(&entry.key);
                }
            }
        }

        let slot = state.order.insert_front();
        let entry = CacheEntry {
            key: key.clone(),
            value: result,
        };
        if slot < state.entries.len() {
            state.entries[slot] = Some(entry);
        } else {
            state.entries.push(Some(entry));
        }
        state.map.insert(key, slot);
    }

    /// Wipes entries and counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        state.entries.clear();
        state.order.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let size = self.state.lock().map.len();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            hit_ratio: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
            size,
        }
    }
}

impl Default for PathConversionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miss_then_put(cache: &PathConversionCache, source: VisVersion, path: &str) {
        assert!(cache.try_get(source, VisVersion::V3_6a, path).is_none());
        cache.put(source, VisVersion::V3_6a, path, None);
    }

    #[test]
    fn test_get_after_put_returns_stored_outcome() {
        let cache = PathConversionCache::new();
        cache.put(VisVersion::V3_4a, VisVersion::V3_6a, "511.331/C221", None);
        let hit = cache
            .try_get(VisVersion::V3_4a, VisVersion::V3_6a, "511.331/C221")
            .expect("entry cached");
        // The negative outcome itself is the cached value.
        assert!(hit.is_none());
    }

    #[test]
    fn test_key_includes_both_versions() {
        let cache = PathConversionCache::new();
        cache.put(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15", None);
        assert!(cache
            .try_get(VisVersion::V3_5a, VisVersion::V3_6a, "514/E15")
            .is_none());
        assert!(cache
            .try_get(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15")
            .is_some());
    }

    #[test]
    fn test_stats_law() {
        let cache = PathConversionCache::new();
        let paths: Vec<String> = (0..10).map(|i| format!("511.{i}/C221")).collect();

        // Seed phase: every lookup misses, then stores.
        for path in &paths {
            miss_then_put(&cache, VisVersion::V3_4a, path);
        }
        // Replay phase: every lookup hits.
        for path in &paths {
            assert!(cache
                .try_get(VisVersion::V3_4a, VisVersion::V3_6a, path)
                .is_some());
        }

        let stats = cache.stats();
        assert_eq!(stats.hits, 10);
        assert_eq!(stats.misses, 10);
        assert_eq!(stats.size, 10);
        assert!((stats.hit_ratio - 0.5).abs() < f64::EPSILON);

        // One lookup beyond the seeded set misses.
        assert!(cache
            .try_get(VisVersion::V3_4a, VisVersion::V3_6a, "999/X")
            .is_none());
        assert_eq!(cache.stats().misses, 11);
    }

    #[test]
    fn test_clear_resets_entries_and_counters() {
        let cache = PathConversionCache::new();
        miss_then_put(&cache, VisVersion::V3_4a, "514/E15");
        assert!(cache
            .try_get(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15")
            .is_some());

        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.size, 0);
        assert!(cache
            .try_get(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15")
            .is_none());
    }

    #[test]
    fn test_put_on_present_key_updates_value() {
        let cache = PathConversionCache::new();
        cache.put(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15", None);
        // Same key again: still one entry.
        cache.put(VisVersion::V3_4a, VisVersion::V3_6a, "514/E15", None);
        assert_eq!(cache.stats().size, 1);
    }
}
