//! Response cache consulted by the coordinator before going to the network.
//!
//! List pages are keyed by their [`ListParams`] and products by id. Both maps
//! are LRU-bounded and every entry expires after a fixed time to live. Search
//! results are not cached.

use crate::model::{ListParams, Product, ProductId, ProductPage};
use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

struct Maps {
    pages: LruCache<ListParams, Entry<ProductPage>>,
    products: LruCache<ProductId, Entry<Product>>,
    generation: u64,
}

/// Writes are tagged with the generation read before the request went out. A
/// [`clear`](ResponseCache::clear) starts a new generation, and writes tagged
/// with an older one are discarded, so a response fetched before an
/// invalidation never lands in the cache after it.
pub struct ResponseCache {
    maps: Mutex<Maps>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache holding up to `capacity` pages and `capacity` products.
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            maps: Mutex::new(Maps {
                pages: LruCache::new(capacity),
                products: LruCache::new(capacity),
                generation: 0,
            }),
            ttl,
        }
    }

    /// The current generation. Read it before going to the network.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn page(&self, params: &ListParams) -> Option<ProductPage> {
        fresh(&mut self.lock().pages, params, self.ttl)
    }

    /// Stores `page` unless the cache was cleared since `generation` was read.
    pub fn store_page(&self, generation: u64, params: ListParams, page: ProductPage) -> bool {
        let mut maps = self.lock();
        if maps.generation != generation {
            debug!(generation, current = maps.generation, "Dropped page from before a clear");
            return false;
        }
        maps.pages.put(params, entry(page));
        true
    }

    pub fn product(&self, id: &ProductId) -> Option<Product> {
        fresh(&mut self.lock().products, id, self.ttl)
    }

    /// Stores `product` unless the cache was cleared since `generation` was read.
    pub fn store_product(&self, generation: u64, product: Product) -> bool {
        let mut maps = self.lock();
        if maps.generation != generation {
            debug!(generation, current = maps.generation, "Dropped product from before a clear");
            return false;
        }
        maps.products.put(product.id.clone(), entry(product));
        true
    }

    /// Drops every cached page and product and starts a new generation.
    pub fn clear(&self) {
        let mut maps = self.lock();
        maps.pages.clear();
        maps.products.clear();
        maps.generation += 1;
        debug!(generation = maps.generation, "Response cache cleared");
    }

    /// Number of cached pages and products, expired entries included.
    pub fn len(&self) -> usize {
        let maps = self.lock();
        maps.pages.len() + maps.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn entry<V>(value: V) -> Entry<V> {
    Entry {
        value,
        stored_at: Instant::now(),
    }
}

fn fresh<K: Hash + Eq, V: Clone>(
    cache: &mut LruCache<K, Entry<V>>,
    key: &K,
    ttl: Duration,
) -> Option<V> {
    let expired = cache.peek(key)?.stored_at.elapsed() >= ttl;
    if expired {
        cache.pop(key);
        return None;
    }
    cache.get(key).map(|entry| entry.value.clone())
}
