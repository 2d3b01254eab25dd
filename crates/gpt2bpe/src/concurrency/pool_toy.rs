//! # Thread Pool Toy

use core::fmt::Debug;
use std::num::NonZeroUsize;

use crate::concurrency::threads;

/// Current Thread -> T Pool.
///
/// This struct provides a thread-id hashed pool of items.
/// Rather than pure thread-local storage, the pool is
/// initialized with a vector of items, and the current
/// thread's ID is hashed to select the item.
///
/// Instance names should prefer `${T-name}_pool`,
/// for example, `regex_pool`, `shard_pool`, etc.
pub struct PoolToy<T>
where
    T: Send,
{
    pool: Vec<T>,
}

impl<T> AsRef<T> for PoolToy<T>
where
    T: Send,
{
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T> PoolToy<T>
where
    T: Send,
{
    /// Create a new thread-hashed pool with the given vector of items.
    ///
    /// ## Panics
    /// If `pool` is empty.
    pub fn new(pool: Vec<T>) -> Self {
        assert!(!pool.is_empty());
        Self { pool }
    }

    /// Build a pool of ``resolve_max_pool(max_pool)`` items from a factory.
    pub fn from_fn<F>(
        max_pool: Option<NonZeroUsize>,
        f: F,
    ) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let size = threads::resolve_max_pool(max_pool).max(1);
        Self::new((0..size).map(f).collect())
    }

    /// Get a reference to the item for the current thread.
    pub fn get(&self) -> &T {
        let tid = threads::current_thread_id_hash();
        &self.pool[tid % self.pool.len()]
    }

    /// Iterate over every item in the pool.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pool.iter()
    }

    /// Get the length of the pool.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.pool.len()
    }
}

impl<T> PoolToy<T>
where
    T: Clone + Send,
{
    /// Initialize a new pool with clones of the given item.
    pub fn init(
        item: T,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        Self::from_fn(max_pool, |_| item.clone())
    }
}

impl<T> Clone for PoolToy<T>
where
    T: Clone + Send,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl<T> Debug for PoolToy<T>
where
    T: Send + Debug,
{
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PoolToy")
            .field("item", &self.pool[0])
            .field("len", &self.pool.len())
            .finish()
    }
}
