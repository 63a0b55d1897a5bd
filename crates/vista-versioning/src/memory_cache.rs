//! General-purpose in-memory cache with size and expiration limits.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Cache behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct MemoryCacheOptions {
    /// Maximum number of entries; 0 means unbounded.
    pub size_limit: usize,
    /// Time after the last access before an entry expires.
    pub default_sliding_expiration: Duration,
}

impl Default for MemoryCacheOptions {
    fn default() -> Self {
        Self {
            size_limit: 0,
            default_sliding_expiration: Duration::from_secs(60 * 60),
        }
    }
}

struct CacheItem<K, V> {
    key: K,
    value: V,
    last_accessed: Instant,
    sliding_expiration: Duration,
}

impl<K, V> CacheItem<K, V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.last_accessed) > self.sliding_expiration
    }
}

struct CacheStateInner<K, V> {
    map: HashMap<K, usize>,
    items: Vec<Option<CacheItem<K, V>>>,
    order: crate::lru::LruList,
}

impl<K, V> Default for CacheStateInner<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            items: Vec::new(),
            order: crate::lru::LruList::new(),
        }
    }
}

/// Thread-safe cache keyed by any hashable type, with LRU eviction at
/// the size limit and sliding expiration by last access.
///
/// Expiration is lazy: entries are checked when touched, plus on demand
/// through [`Self::cleanup_expired`].
pub struct MemoryCache<K, V> {
    state: Mutex<CacheStateInner<K, V>>,
    options: MemoryCacheOptions,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(options: MemoryCacheOptions) -> Self {
        Self {
            state: Mutex::new(CacheStateInner::default()),
            options,
        }
    }

    fn store(state: &mut CacheStateInner<K, V>, item: CacheItem<K, V>) {
        let slot = state.order.insert_front();
        let key = item.key.clone();
        if slot < state.items.len() {
            state.items[slot] = Some(item);
        } else {
            state.items.push(Some(item));
        }
        state.map.insert(key, slot);
    }

    fn drop_slot(state: &mut CacheStateInner<K, V>, slot: usize) {
        state.order.remove(slot);
        if let Some(item) = state.items[slot].take() {
            state.map.remove(&item.key);
        }
    }

    /// The cached value for `key`, or the factory's result, which is
    /// cached before being returned.
    pub fn get_or_create(&self, key: K, factory: impl FnOnce() -> V) -> V {
        let now = Instant::now();
        let mut state = self.state.lock();

        if let Some(&slot) = state.map.get(&key) {
            let expired = state.items[slot]
                .as_ref()
                .map_or(true, |item| item.is_expired(now));
            if !expired {
                state.order.touch(slot);
                let item = state.items[slot].as_mut().expect("mapped slot is occupied");
                item.last_accessed = now;
                return item.value.clone();
            }
            Self::drop_slot(&mut state, slot);
        }

        let value = factory();
        if self.options.size_limit > 0 && state.map.len() >= self.options.size_limit {
            if let Some(evicted) = state.order.evict_tail() {
                if let Some(item) = state.items[evicted].take() {
                    state.map.remove(&item.key);
                }
            }
        }
        Self::store(
            &mut state,
            CacheItem {
                key,
                value: value.clone(),
                last_accessed: now,
                sliding_expiration: self.options.default_sliding_expiration,
            },
        );
        value
    }

    /// The cached value without creating one; expired entries are
    /// dropped on the way.
    pub fn try_get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();
        let &slot = state.map.get(key)?;

        let expired = state.items[slot]
            .as_ref()
            .map_or(true, |item| item.is_expired(now));
        if expired {
            Self::drop_slot(&mut state, slot);
            return None;
        }

        state.order.touch(slot);
        let item = state.items[slot].as_mut().expect("mapped slot is occupied");
        item.last_accessed = now;
        Some(item.value.clone())
    }

    /// Removes an entry; `true` when it existed.
    pub fn remove(&self, key: &K) -> bool {
        let mut state = self.state.lock();
        let Some(&slot) = state.map.get(key) else {
            return false;
        };
        Self::drop_slot(&mut state, slot);
        true
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        state.items.clear();
        state.order.clear();
    }

    pub fn len(&self) -> usize {
        self.state.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().map.is_empty()
    }

    /// On-demand scan dropping every expired entry.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        let mut state = self.state.lock();
        let expired: Vec<usize> = state
            .items
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| {
                item.as_ref()
                    .filter(|item| item.is_expired(now))
                    .map(|_| slot)
            })
            .collect();
        for slot in expired {
            Self::drop_slot(&mut state, slot);
        }
    }
}
