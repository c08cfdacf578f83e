//! ConcurrentHashSet - A async locked [`HashSet`](super::HashSet)
//!
//! For more, see [`ConcurrentHashSet`](super::ConcurrentHashSet).

use std::iter::FromIterator;

use tokio::sync::RwLock;

use super::HashSet;
use crate::hashable::Hashable;
use crate::iter::SeqIter;

/// A [`HashSet`] shared between tasks behind an async reader-writer lock.
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

impl<T: Hashable> FromIterator<T> for ConcurrentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<HashSet<T>>().into()
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
    pub async fn insert(&self, t: T) -> bool {
        self.inner.write().await.insert(t)
    }

    /// `true` if an element equal to `t` is present.
    pub async fn contains(&self, t: &T) -> bool {
        self.inner.read().await.contains(t)
    }

    /// Remove the element equal to `t`. Returns `true` if one was present.
    pub async fn remove(&self, t: &T) -> bool {
        self.inner.write().await.remove(t)
    }

    /// Returns the number of elements in the set.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Determine if the set is currently empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Current number of buckets.
    pub async fn capacity(&self) -> usize {
        self.inner.read().await.capacity()
    }

    /// Reset the set to an empty state with the default capacity.
    pub async fn clear(&self) {
        self.inner.write().await.clear()
    }

    /// A copy of every element, taken under one shared lock.
    pub async fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().await.to_vec()
    }

    /// A point in time copy of every element, taken under one shared lock.
    pub async fn snapshot(&self) -> SeqIter<T>
    where
        T: Clone,
    {
        self.inner.read().await.snapshot()
    }

    /// Add every element of `iter` under a single exclusive lock. The
    /// iterator is drained before the lock is awaited.
    pub async fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let items: Vec<T> = iter.into_iter().collect();
        self.inner.write().await.extend(items)
    }
}

#[cfg(test)]
mod tests {
    use super::ConcurrentHashSet;

    #[tokio::test]
    async fn test_hashset_basic_async() {
        let set: ConcurrentHashSet<i64> = ConcurrentHashSet::new();
        assert!(set.insert(1).await);
        assert!(set.insert(-1).await);
        assert!(!set.insert(1).await);
        assert!(set.contains(&-1).await);
        assert!(set.remove(&1).await);
        assert!(!set.remove(&1).await);
        assert_eq!(set.len().await, 1);
        assert_eq!(set.to_vec().await, vec![-1]);
        let mut snap = set.snapshot().await;
        set.clear().await;
        assert!(set.is_empty().await);
        assert_eq!(snap.next_item(), -1);
        assert!(!snap.has_next());
    }

    #[tokio::test]
    async fn test_hashset_extend_and_capacity() {
        let set: ConcurrentHashSet<i32> = ConcurrentHashSet::new();
        set.extend([1, 2, 3, 2, 1]).await;
        assert_eq!(set.len().await, 3);
        assert_eq!(set.capacity().await, 49);
        set.extend(0..40).await;
        assert_eq!(set.len().await, 40);
        assert_eq!(set.capacity().await, 97);
    }
}
