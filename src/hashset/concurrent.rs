//! ConcurrentHashSet - A [`HashSet`] shared between threads behind one
//! reader-writer lock. The lock scope is exactly one call, see
//! [`ConcurrentHashMap`](crate::hashmap::ConcurrentHashMap).

use std::fmt::{self, Debug};
use std::iter::FromIterator;

use parking_lot::RwLock;

use super::HashSet;
use crate::hashable::Hashable;
use crate::iter::SeqIter;

/// A [`HashSet`] that can be shared between threads.
pub struct ConcurrentHashSet<T>
where
    T: Hashable,
{
    inner: RwLock<HashSet<T>>,
}

impl<T: Hashable> Default for ConcurrentHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hashable> From<HashSet<T>> for ConcurrentHashSet<T> {
    fn from(set: HashSet<T>) -> Self {
        ConcurrentHashSet {
            inner: RwLock::new(set),
        }
    }
}

impl<T: Hashable> ConcurrentHashSet<T> {
    /// Construct an empty set with the default capacity.
    pub fn new() -> Self {
        HashSet::new().into()
    }

    /// Construct an empty set sized for about `size` elements.
    pub fn with_expected_size(size: usize) -> Self {
        HashSet::with_expected_size(size).into()
    }

    /// Consume the wrapper and return the unlocked set.
    pub fn into_inner(self) -> HashSet<T> {
        self.inner.into_inner()
    }

    /// Add an element. Returns `true` if it was not already present.
    pub fn insert(&self, t: T) -> bool {
        self.inner.write().insert(t)
    }

    /// `true` if an element equal to `t` is present.
    pub fn contains(&self, t: &T) -> bool {
        self.inner.read().contains(t)
    }

    /// Remove the element equal to `t`. Returns `true` if one was present.
    pub fn remove(&self, t: &T) -> bool {
        self.inner.write().remove(t)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Determine if the set is currently empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Reset the set to an empty state with the default capacity.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// A copy of every element, taken under one shared lock.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().to_vec()
    }

    /// A point in time copy of every element, taken under one shared lock.
    pub fn snapshot(&self) -> SeqIter<T>
    where
        T: Clone,
    {
        self.inner.read().snapshot()
    }

    /// Add every element of `iter` under a single exclusive lock. The iterator
    /// is drained before the lock is taken, so it may read this set.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let items: Vec<T> = iter.into_iter().collect();
        self.inner.write().extend(items)
    }
}

impl<T: Hashable> FromIterator<T> for ConcurrentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<HashSet<T>>().into()
    }
}

impl<T: Hashable + Debug> Debug for ConcurrentHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.inner.read(), f)
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for ConcurrentHashSet<T>
where
    T: Hashable + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&*self.inner.read(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ConcurrentHashSet<T>
where
    T: Hashable + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <HashSet<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
