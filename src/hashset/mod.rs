//! HashSet - A separately chained set of [`Hashable`] elements.
//!
//! This is the same table as [`HashMap`](crate::hashmap::HashMap), storing bare
//! elements instead of pairs. For a set shared between threads see
//! [`ConcurrentHashSet`].

#[cfg(feature = "asynch")]
pub mod asynch;
pub mod concurrent;

pub use self::concurrent::ConcurrentHashSet;

use std::fmt::{self, Debug};
use std::iter::FromIterator;

use crate::hashable::Hashable;
use crate::internals::table::{self, Entry, Table};
use crate::iter::SeqIter;

// An element is its own key.
#[derive(Clone)]
#[repr(transparent)]
struct Member<T>(T);

impl<T: Hashable> Entry for Member<T> {
    type Key = T;

    #[inline]
    fn key(&self) -> &T {
        &self.0
    }
}

/// A separately chained hash set.
///
/// # Examples
/// ```
/// use chaintable::hashset::HashSet;
///
/// let mut set: HashSet<i32> = [1, 2, 3].into_iter().collect();
/// assert!(set.contains(&2));
/// assert!(!set.contains(&5));
/// assert!(set.remove(&2));
/// assert!(!set.contains(&2));
/// assert_eq!(set.len(), 2);
/// ```
pub struct HashSet<T>
where
    T: Hashable,
{
    table: Table<Member<T>>,
}

impl<T: Hashable> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hashable + Clone> Clone for HashSet<T> {
    fn clone(&self) -> Self {
        HashSet {
            table: self.table.clone(),
        }
    }
}

impl<T: Hashable> HashSet<T> {
    /// Construct an empty set with the default capacity of 49 buckets.
    pub fn new() -> Self {
        HashSet {
            table: Table::new(),
        }
    }

    /// Construct an empty set sized for about `size` elements. The starting
    /// bucket count is `max(49, 2 * size - 1)`.
    pub fn with_expected_size(size: usize) -> Self {
        HashSet {
            table: Table::with_expected_size(size),
        }
    }

    /// Add an element. Returns `true` if it was not already present. Adding an
    /// element equal to one already present leaves the stored one in place.
    pub fn insert(&mut self, t: T) -> bool {
        if self.table.contains(&t) {
            return false;
        }
        self.table.insert_unique(Member(t));
        true
    }

    /// `true` if an element equal to `t` is present.
    pub fn contains(&self, t: &T) -> bool {
        self.table.contains(t)
    }

    /// Borrow the stored element equal to `t`.
    pub fn get(&self, t: &T) -> Option<&T> {
        self.table.search(t).map(|m| &m.0)
    }

    /// Remove the element equal to `t`. Returns `true` if one was present.
    pub fn remove(&mut self, t: &T) -> bool {
        self.take(t).is_some()
    }

    /// Remove and return the element equal to `t`.
    pub fn take(&mut self, t: &T) -> Option<T> {
        self.table.remove(t).map(|m| m.0)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Determine if the set is currently empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Reset this set to an empty state with the default capacity.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Iterator over `&T`, in unspecified order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// A copy of every element, in unspecified order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.table.collect_with(|m| m.0.clone())
    }

    /// A cursor over a copy of every element as it is right now.
    pub fn snapshot(&self) -> SeqIter<T>
    where
        T: Clone,
    {
        SeqIter::new(self.to_vec())
    }
}

/// Iterator over references to the elements of a [`HashSet`].
pub struct Iter<'a, T> {
    inner: table::Iter<'a, Member<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|m| &m.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Hashable> IntoIterator for &'a HashSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hashable> IntoIterator for HashSet<T> {
    type Item = T;
    type IntoIter = SeqIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let items = self.table.into_entries().into_iter().map(|m| m.0).collect();
        SeqIter::new(items)
    }
}

impl<T: Hashable> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Hashable> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|t| {
            let _ = self.insert(t);
        });
    }
}

impl<T: Hashable + Debug> Debug for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for HashSet<T>
where
    T: Hashable + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for HashSet<T>
where
    T: Hashable + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(crate::utils::SeqCollector::new())
    }
}

#[cfg(test)]
mod tests {
    use super::HashSet;
    use crate::hashable::Hashable;

    #[test]
    fn test_hashset_small_scenario() {
        let mut set: HashSet<i64> = HashSet::new();
        set.insert(1);
        set.insert(2);
        set.insert(3);
        assert_eq!(set.capacity(), 49);
        assert!(set.contains(&2));
        assert!(!set.contains(&5));
        assert!(set.remove(&2));
        assert!(!set.contains(&2));
        assert_eq!(set.len(), 2);
        assert!(!set.remove(&2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_hashset_insert_is_idempotent() {
        let mut set: HashSet<&str> = HashSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&"a"), Some(&"a"));
    }

    #[test]
    fn test_hashset_rehash_preserves_members() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut set: HashSet<i32> = HashSet::new();
        for i in 0..36 {
            set.insert(i);
        }
        assert_eq!(set.capacity(), 49);
        set.insert(36);
        assert_eq!(set.capacity(), 97);
        for i in 0..37 {
            assert!(set.contains(&i));
        }
        set.table.verify();
    }

    #[test]
    fn test_hashset_deep_equality() {
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Word {
            letters: Vec<char>,
        }

        impl Hashable for Word {
            fn hash_code(&self) -> i64 {
                // Deliberately weak: all words of a length collide.
                self.letters.len() as i64
            }
        }

        let w = |s: &str| Word {
            letters: s.chars().collect(),
        };

        let mut set = HashSet::new();
        set.insert(w("abc"));
        set.insert(w("cab"));
        set.insert(w("abc"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&w("cab")));
        assert!(!set.contains(&w("bca")));
        assert_eq!(set.take(&w("abc")), Some(w("abc")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_hashset_clear_and_snapshot() {
        let mut set: HashSet<u16> = (0..100).collect();
        let snap = set.snapshot();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 49);
        assert!(!set.contains(&10));
        let mut seen: Vec<u16> = snap.collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_hashset_into_iter() {
        let set: HashSet<u8> = vec![5, 5, 6].into_iter().collect();
        assert_eq!(set.iter().len(), 2);
        let mut all: Vec<u8> = set.into_iter().collect();
        all.sort_unstable();
        assert_eq!(all, vec![5, 6]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_hashset_serde() {
        let set: HashSet<u32> = (0..5).collect();
        let json = serde_json::to_string(&set).unwrap();
        let back: HashSet<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 5);
        assert!(back.contains(&4));
    }
}
