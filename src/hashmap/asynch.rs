//! ConcurrentHashMap - A async locked [`HashMap`](super::HashMap)
//!
//! Same lock discipline as the threaded variant, but waiting for the lock
//! yields to the executor rather than blocking the thread. For more, see
//! [`ConcurrentHashMap`](super::ConcurrentHashMap).

use std::iter::FromIterator;

use tokio::sync::RwLock;

use super::{HashMap, Pair};
use crate::hashable::Hashable;
use crate::iter::SeqIter;

/// A [`HashMap`] shared between tasks behind an async reader-writer lock.
pub struct ConcurrentHashMap<K, V>
where
    K: Hashable,
{
    inner: RwLock<HashMap<K, V>>,
}

impl<K: Hashable, V> Default for ConcurrentHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hashable, V> From<HashMap<K, V>> for ConcurrentHashMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        ConcurrentHashMap {
            inner: RwLock::new(map),
        }
    }
}

impl<K: Hashable, V> FromIterator<(K, V)> for ConcurrentHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().collect::<HashMap<K, V>>().into()
    }
}

impl<K: Hashable, V> ConcurrentHashMap<K, V> {
    /// Construct an empty map with the default capacity.
    pub fn new() -> Self {
        HashMap::new().into()
    }

    /// Construct an empty map sized for about `size` entries.
    pub fn with_expected_size(size: usize) -> Self {
        HashMap::with_expected_size(size).into()
    }

    /// Consume the wrapper and return the unlocked map.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.inner.into_inner()
    }

    /// Retrieve a clone of the value for `k`, if present.
    pub async fn get(&self, k: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().await.get(k).cloned()
    }

    /// Assert if a key exists in the map.
    pub async fn contains_key(&self, k: &K) -> bool {
        self.inner.read().await.contains_key(k)
    }

    /// Insert or update a value by key, returning the previous value.
    pub async fn insert(&self, k: K, v: V) -> Option<V> {
        self.inner.write().await.insert(k, v)
    }

    /// Remove a key, returning its value if it was present.
    pub async fn remove(&self, k: &K) -> Option<V> {
        self.inner.write().await.remove(k)
    }

    /// Returns the current number of k:v pairs in the map
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Determine if the map is currently empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Current number of buckets.
    pub async fn capacity(&self) -> usize {
        self.inner.read().await.capacity()
    }

    /// Reset the map to an empty state with the default capacity.
    pub async fn clear(&self) {
        self.inner.write().await.clear()
    }

    /// A copy of every key, taken under one shared lock.
    pub async fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().await.keys()
    }

    /// A copy of every value, taken under one shared lock.
    pub async fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.read().await.values()
    }

    /// A point in time copy of every pair, taken under one shared lock.
    pub async fn snapshot(&self) -> SeqIter<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.read().await.snapshot()
    }

    /// Insert every pair of `iter` under a single exclusive lock. The iterator
    /// is drained before the lock is awaited.
    pub async fn extend<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        let pairs: Vec<(K, V)> = iter.into_iter().collect();
        self.inner.write().await.extend(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::ConcurrentHashMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hashmap_basic_write() {
        let hmap: ConcurrentHashMap<usize, usize> = ConcurrentHashMap::new();

        hmap.insert(10, 10).await;
        hmap.insert(15, 15).await;

        assert!(hmap.contains_key(&10).await);
        assert!(hmap.contains_key(&15).await);
        assert!(!hmap.contains_key(&20).await);
        assert_eq!(hmap.get(&10).await, Some(10));

        assert!(hmap.remove(&10).await.is_some());
        assert!(!hmap.contains_key(&10).await);
        assert!(hmap.remove(&30).await.is_none());
        assert_eq!(hmap.len().await, 1);

        hmap.clear().await;
        assert!(hmap.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_hashmap_parallel_tasks() {
        let hmap: Arc<ConcurrentHashMap<u64, u64>> = Arc::new(ConcurrentHashMap::new());
        let tasks: Vec<_> = (0..4u64)
            .map(|t| {
                let hmap = hmap.clone();
                tokio::spawn(async move {
                    for i in 0..250 {
                        hmap.insert(t * 1000 + i, i).await;
                    }
                })
            })
            .collect();
        for t in tasks {
            t.await.unwrap();
        }
        assert_eq!(hmap.len().await, 1000);
        assert_eq!(hmap.get(&3249).await, Some(249));

        let snap = hmap.snapshot().await;
        assert_eq!(snap.len(), 1000);
        let mut keys = hmap.keys().await;
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 1000);
        assert_eq!(hmap.values().await.len(), 1000);
    }

    #[tokio::test]
    async fn test_hashmap_extend_and_capacity() {
        let hmap: ConcurrentHashMap<u32, u32> = ConcurrentHashMap::new();
        assert_eq!(hmap.capacity().await, 49);
        hmap.extend((0..36).map(|i| (i, i))).await;
        assert_eq!(hmap.capacity().await, 49);
        hmap.extend(vec![(36, 36), (0, 100)]).await;
        assert_eq!(hmap.len().await, 37);
        assert_eq!(hmap.capacity().await, 97);
        assert_eq!(hmap.get(&0).await, Some(100));

        let sized: ConcurrentHashMap<u32, u32> = ConcurrentHashMap::with_expected_size(100);
        assert_eq!(sized.capacity().await, 199);
    }
}
