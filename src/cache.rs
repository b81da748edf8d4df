//! In-process caches for category reads.
//!
//! Two moka caches with independent policies sit in front of storage: one for
//! point lookups keyed by [`CategoryId`], one for tree projections keyed by
//! [`TreeKey`]. Any mutation flushes both, since a single change can alter an
//! unbounded number of derived trees.

use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::notification::RemovalCause;
use moka::sync::Cache;
use serde::Serialize;

use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryTreeDto};
use crate::models::config::{CacheConfig, CacheSpec};

/// Key of a cached tree projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKey {
    /// The forest of every root category.
    All,
    /// The subtree rooted at a specific category.
    Root(CategoryId),
}

/// Point-in-time counters of one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entry_count: u64,
    pub hits: u64,
    pub misses: u64,
    /// Entries removed by capacity or expiry, not by explicit invalidation.
    pub evictions: u64,
}

/// Counters of both category caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCacheStats {
    pub categories: CacheStats,
    pub category_tree: CacheStats,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// A moka cache that records hit/miss/eviction counts.
#[derive(Clone)]
struct RecordingCache<K, V> {
    name: &'static str,
    inner: Cache<K, V>,
    counters: Arc<Counters>,
}

impl<K, V> RecordingCache<K, V>
where
    K: Hash + Eq + Send + Sync + Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(
        name: &'static str,
        max_capacity: u64,
        time_to_idle: Option<Duration>,
        time_to_live: Option<Duration>,
    ) -> Self {
        let counters = Arc::new(Counters::default());
        let listener_counters = Arc::clone(&counters);

        let mut builder = Cache::<K, V>::builder()
            .name(name)
            .max_capacity(max_capacity)
            .eviction_listener(move |_key: Arc<K>, _value: V, cause: RemovalCause| {
                if cause.was_evicted() {
                    listener_counters.evictions.fetch_add(1, Ordering::Relaxed);
                }
            });
        if let Some(tti) = time_to_idle {
            builder = builder.time_to_idle(tti);
        }
        if let Some(ttl) = time_to_live {
            builder = builder.time_to_live(ttl);
        }

        log::debug!(
            "Cache '{name}' configured: max_capacity={max_capacity}, time_to_idle={time_to_idle:?}, time_to_live={time_to_live:?}"
        );

        Self {
            name,
            inner: builder.build(),
            counters,
        }
    }

    fn from_spec(name: &'static str, spec: &CacheSpec) -> Self {
        Self::new(
            name,
            spec.max_capacity,
            spec.time_to_idle(),
            spec.time_to_live(),
        )
    }

    fn get(&self, key: &K) -> Option<V> {
        let value = self.inner.get(key);
        if value.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache HIT ({}): {key:?}", self.name);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache MISS ({}): {key:?}", self.name);
        }
        value
    }

    fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Shared cache component injected into the category service functions.
///
/// Cloning is cheap and clones share the same underlying storage and counters.
#[derive(Clone)]
pub struct CategoryCache {
    categories: RecordingCache<CategoryId, CategoryDto>,
    category_tree: RecordingCache<TreeKey, CategoryTreeDto>,
}

impl Debug for CategoryCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryCache")
            .field("categories", &self.categories.inner.entry_count())
            .field("category_tree", &self.category_tree.inner.entry_count())
            .finish()
    }
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl CategoryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            categories: RecordingCache::from_spec("categories", &config.categories),
            category_tree: RecordingCache::from_spec("categoryTree", &config.category_tree),
        }
    }

    pub fn get_category(&self, id: CategoryId) -> Option<CategoryDto> {
        self.categories.get(&id)
    }

    pub fn insert_category(&self, id: CategoryId, category: CategoryDto) {
        self.categories.insert(id, category);
    }

    pub fn get_tree(&self, key: TreeKey) -> Option<CategoryTreeDto> {
        self.category_tree.get(&key)
    }

    pub fn insert_tree(&self, key: TreeKey, tree: CategoryTreeDto) {
        self.category_tree.insert(key, tree);
    }

    /// Drop every entry of both caches.
    pub fn invalidate_all(&self) {
        self.categories.invalidate_all();
        self.category_tree.invalidate_all();
        log::debug!("Category caches flushed");
    }

    pub fn stats(&self) -> CategoryCacheStats {
        CategoryCacheStats {
            categories: self.categories.stats(),
            category_tree: self.category_tree.stats(),
        }
    }
}
