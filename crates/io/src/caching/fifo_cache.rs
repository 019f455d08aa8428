//! FIFO Cache implementation that matches the reference.IO.Caching.FIFOCache exactly.
//!
//! This module provides a First-In-First-Out cache implementation.

use super::cache::{Cache, CacheItem, ConcreteCache};
use std::hash::Hash;
use std::marker::PhantomData;

/// Type alias for the inner cache type used by FIFOCache
type FIFOInnerCache<TKey, TValue, F> =
    ConcreteCache<TKey, TValue, F, fn(&mut CacheItem<TKey, TValue>)>;

/// FIFO (First-In-First-Out) cache implementation.
///
pub struct FIFOCache<TKey, TValue, F>
where
    TKey: Hash + Eq + Clone + Send + Sync,
    TValue: Clone + Send + Sync,
    F: Fn(&TValue) -> TKey + Send + Sync,
{
    /// The underlying concrete cache implementation
    inner: FIFOInnerCache<TKey, TValue, F>,
    /// Phantom data for type parameters
    _phantom: PhantomData<(TKey, TValue)>,
}

impl<TKey, TValue, F> FIFOCache<TKey, TValue, F>
where
    TKey: Hash + Eq + Clone + Send + Sync,
    TValue: Clone + Send + Sync,
    F: Fn(&TValue) -> TKey + Send + Sync,
{
    /// Creates a new FIFO cache with the specified capacity and key extraction function.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - The maximum number of items the cache can hold
    /// * `get_key_fn` - Function to extract the key from a value
    ///
    /// # Returns
    ///
    /// A new FIFO cache
    pub fn new(max_capacity: usize, get_key_fn: F) -> Self
    where
        TKey: Default,
        TValue: Default,
    {
        let on_access_fn: fn(&mut CacheItem<TKey, TValue>) = |_item| {
            // No-op: FIFO doesn't change order on access
        };

        Self {
            inner: ConcreteCache::new(max_capacity, get_key_fn, on_access_fn),
            _phantom: PhantomData,
        }
    }
}

impl<TKey, TValue, F> Cache<TKey, TValue> for FIFOCache<TKey, TValue, F>
where
    TKey: Hash + Eq + Clone + Send + Sync,
    TValue: Clone + Send + Sync,
    F: Fn(&TValue) -> TKey + Send + Sync,
{
    fn get_key_for_item(&self, item: &TValue) -> TKey {
        self.inner.get_key_for_item(item)
    }

    fn on_access(&self, item: &mut CacheItem<TKey, TValue>) {
        self.inner.on_access(item)
    }

    fn max_capacity(&self) -> usize {
        self.inner.max_capacity()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn get(&self, key: &TKey) -> Option<TValue> {
        self.inner.get(key)
    }

    fn add(&self, item: TValue) {
        self.inner.add(item)
    }

    fn add_range(&self, items: Vec<TValue>) {
        self.inner.add_range(items)
    }

    fn clear(&self) {
        self.inner.clear()
    }

    fn contains_key(&self, key: &TKey) -> bool {
        self.inner.contains_key(key)
    }

    fn remove_key(&self, key: &TKey) -> bool {
        self.inner.remove_key(key)
    }

    fn try_get(&self, key: &TKey) -> Option<TValue> {
        self.inner.try_get(key)
    }

    fn copy_to(&self, array: &mut [TValue], start_index: usize) -> Result<(), String> {
        self.inner.copy_to(array, start_index)
    }

    fn values(&self) -> Vec<TValue> {
        self.inner.values()
    }
}
