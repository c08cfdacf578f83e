//! ConcurrentHashMap - A [`HashMap`] shared between threads behind one
//! reader-writer lock.
//!
//! Every call takes the lock for exactly the duration of that call: shared for
//! reads, exclusive for writes. There is no way to hold the lock across two
//! calls, so a `get` followed by an `insert` is *not* atomic. Because no
//! reference may outlive the lock, reads hand back clones.

use std::fmt::{self, Debug};
use std::iter::FromIterator;

use parking_lot::RwLock;

use super::{HashMap, Pair};
use crate::hashable::Hashable;
use crate::iter::SeqIter;

/// A [`HashMap`] that can be shared between threads.
///
/// Readers proceed in parallel. Writers are serialised, and wait for any
/// active readers to finish. Growth of the table happens inside the writer's
/// exclusive section, so a reader never observes a half rehashed table.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use chaintable::hashmap::ConcurrentHashMap;
///
/// let map = Arc::new(ConcurrentHashMap::new());
/// let handles: Vec<_> = (0..4u32)
///     .map(|t| {
///         let map = map.clone();
///         thread::spawn(move || {
///             for i in 0..100 {
///                 map.insert(t * 100 + i, i);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(map.len(), 400);
/// assert_eq!(map.get(&250), Some(50));
/// ```
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
    pub fn get(&self, k: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(k).cloned()
    }

    /// Assert if a key exists in the map.
    pub fn contains_key(&self, k: &K) -> bool {
        self.inner.read().contains_key(k)
    }

    /// Insert or update a value by key, returning the previous value.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.inner.write().insert(k, v)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&self, k: &K) -> Option<V> {
        self.inner.write().remove(k)
    }

    /// Returns the current number of k:v pairs in the map
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Determine if the map is currently empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Reset the map to an empty state with the default capacity.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// A copy of every key, taken under one shared lock.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().keys()
    }

    /// A copy of every value, taken under one shared lock.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.read().values()
    }

    /// A point in time copy of every pair, taken under one shared lock. The
    /// cursor stays consistent after the lock is released.
    pub fn snapshot(&self) -> SeqIter<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.read().snapshot()
    }

    /// Insert every pair of `iter` under a single exclusive lock. The iterator
    /// is drained before the lock is taken, so it may read this map.
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        let pairs: Vec<(K, V)> = iter.into_iter().collect();
        self.inner.write().extend(pairs)
    }
}

impl<K: Hashable, V> FromIterator<(K, V)> for ConcurrentHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().collect::<HashMap<K, V>>().into()
    }
}

impl<K: Hashable + Debug, V: Debug> Debug for ConcurrentHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.inner.read(), f)
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for ConcurrentHashMap<K, V>
where
    K: Hashable + serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&*self.inner.read(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for ConcurrentHashMap<K, V>
where
    K: Hashable + serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <HashMap<K, V> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
