//! # Reduction Cache
//!
//! Natural text repeats the same chunks constantly; this caches
//! [`reduce_chunk`] results keyed by the encoded chunk.
//!
//! The cache is split into LRU shards, each behind its own lock;
//! the calling thread's id selects the shard.

use core::{fmt::Debug, num::NonZeroUsize};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::{
    concurrency::{PoolToy, threads::resolve_max_pool},
    encoders::merge_scan::reduce_chunk,
    errors::BpeResult,
    vocab::MergeRankTable,
};

/// A cached reduction: the symbols of one chunk.
pub type ReducedSymbols = Arc<[String]>;

type Shard = Mutex<LruCache<String, ReducedSymbols>>;

/// Bounded, sharded LRU cache of chunk reductions.
///
/// A cache belongs to one encoder, and so to one [`MergeRankTable`];
/// keys do not carry the table identity.
///
/// Two threads missing on the same key may both reduce it;
/// reduction is deterministic, so the later write is equivalent.
pub struct ReductionCache {
    shard_pool: PoolToy<Shard>,
    capacity: usize,
}

impl Debug for ReductionCache {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ReductionCache")
            .field("capacity", &self.capacity)
            .field("shards", &self.shard_count())
            .field("len", &self.len())
            .finish()
    }
}

impl ReductionCache {
    /// Create a cache holding at most `capacity` chunks in total.
    ///
    /// ## Arguments
    /// * `capacity` - total entry bound, divided across shards.
    /// * `max_shards` - shard count limit; if None, lib defaults are used.
    pub fn new(
        capacity: NonZeroUsize,
        max_shards: Option<NonZeroUsize>,
    ) -> Self {
        let shards = resolve_max_pool(max_shards).clamp(1, capacity.get());
        let per_shard = capacity.get() / shards;

        let shard_pool = PoolToy::from_fn(NonZeroUsize::new(shards), |_| {
            Mutex::new(LruCache::new(
                NonZeroUsize::new(per_shard).unwrap_or(NonZeroUsize::MIN),
            ))
        });

        let capacity = per_shard * shard_pool.len();
        log::debug!(
            "reduction cache: {} shards x {} entries",
            shard_pool.len(),
            per_shard
        );

        Self {
            shard_pool,
            capacity,
        }
    }

    /// Total entry bound across all shards.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shard_pool.len()
    }

    /// Number of cached entries across all shards.
    pub fn len(&self) -> usize {
        self.shard_pool.iter().map(|s| s.lock().len()).sum()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.shard_pool.iter().for_each(|s| s.lock().clear());
    }

    /// Look up a chunk in the current thread's shard.
    pub fn get(
        &self,
        chunk: &str,
    ) -> Option<ReducedSymbols> {
        self.shard_pool.get().lock().get(chunk).cloned()
    }

    /// Look up a chunk, reducing and caching it on a miss.
    ///
    /// The shard lock is not held while reducing.
    pub fn get_or_reduce(
        &self,
        chunk: &str,
        ranks: &MergeRankTable,
    ) -> BpeResult<ReducedSymbols> {
        let shard = self.shard_pool.get();
        if let Some(hit) = shard.lock().get(chunk) {
            return Ok(hit.clone());
        }

        let reduced: ReducedSymbols = reduce_chunk(chunk, ranks)?.into();
        shard.lock().put(chunk.to_string(), reduced.clone());
        Ok(reduced)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::errors::BpeError;

    fn ranks() -> MergeRankTable {
        MergeRankTable::from_merges([("h", "e"), ("l", "l"), ("he", "ll"), ("hell", "o")]).unwrap()
    }

    fn single_shard(capacity: usize) -> ReductionCache {
        ReductionCache::new(
            NonZeroUsize::new(capacity).unwrap(),
            NonZeroUsize::new(1),
        )
    }

    #[test]
    fn test_get_or_reduce() {
        let ranks = ranks();
        let cache = single_shard(8);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 8);
        assert_eq!(cache.shard_count(), 1);

        let first = cache.get_or_reduce("hello", &ranks).unwrap();
        assert_eq!(&first[..], &["hello".to_string()]);
        assert_eq!(cache.len(), 1);

        let second = cache.get_or_reduce("hello", &ranks).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("hello").is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let ranks = ranks();
        let cache = single_shard(2);

        cache.get_or_reduce("he", &ranks).unwrap();
        cache.get_or_reduce("ll", &ranks).unwrap();
        // Touch "he" so "ll" is the eviction candidate.
        assert!(cache.get("he").is_some());
        cache.get_or_reduce("hello", &ranks).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get("he").is_some());
        assert!(cache.get("ll").is_none());
        assert!(cache.get("hello").is_some());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let ranks = ranks();
        let cache = single_shard(4);
        assert!(matches!(
            cache.get_or_reduce("", &ranks),
            Err(BpeError::EmptyInput)
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_bounds_shards() {
        let cache = ReductionCache::new(NonZeroUsize::new(1).unwrap(), NonZeroUsize::new(64));
        assert_eq!(cache.shard_count(), 1);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_concurrent_use() {
        let ranks = Arc::new(ranks());
        let cache = Arc::new(ReductionCache::new(
            NonZeroUsize::new(64).unwrap(),
            NonZeroUsize::new(4),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ranks = ranks.clone();
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        for chunk in ["hello", "hell", "oh", "ll"] {
                            let got = cache.get_or_reduce(chunk, &ranks).unwrap();
                            assert_eq!(got.concat(), chunk);
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert!(cache.len() <= cache.capacity());
        assert!(!cache.is_empty());
    }
}
