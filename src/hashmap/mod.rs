//! HashMap - A separately chained map keyed by [`Hashable`] hash codes.
//!
//! This map does not use `std::hash::Hash`. Keys supply their own `i64` hash
//! code, and keys that land in the same bucket are told apart with `Eq`. This
//! is useful when a key type has a natural hash code of its own, or when it is
//! not natively hashable at all.
//!
//! [`HashMap`] performs no locking. For a map shared between threads see
//! [`ConcurrentHashMap`], and with the `asynch` feature,
//! [`asynch::ConcurrentHashMap`].

#[cfg(feature = "asynch")]
pub mod asynch;
pub mod concurrent;

pub use self::concurrent::ConcurrentHashMap;

use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::mem;

use crate::hashable::Hashable;
use crate::internals::table::{self, Entry, Table};
use crate::iter::SeqIter;

/// A key-value pair as stored in a [`HashMap`], and as yielded by its
/// snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    /// Build a pair.
    pub fn new(key: K, value: V) -> Self {
        Pair { key, value }
    }

    /// The key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into `(key, value)`.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Pair { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(p: Pair<K, V>) -> Self {
        p.into_parts()
    }
}

impl<K: Hashable, V> Entry for Pair<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

/// A separately chained hash map.
///
/// # Examples
/// ```
/// use chaintable::hashmap::HashMap;
///
/// let mut map: HashMap<i32, &str> = HashMap::new();
/// assert_eq!(map.insert(1, "one"), None);
/// assert_eq!(map.insert(1, "uno"), Some("one"));
/// assert_eq!(map.get(&1), Some(&"uno"));
/// assert_eq!(map.len(), 1);
///
/// assert_eq!(map.remove(&2), None);
/// assert_eq!(map.remove(&1), Some("uno"));
/// assert!(map.is_empty());
/// ```
pub struct HashMap<K, V>
where
    K: Hashable,
{
    table: Table<Pair<K, V>>,
}

impl<K: Hashable, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hashable + Clone, V: Clone> Clone for HashMap<K, V> {
    fn clone(&self) -> Self {
        HashMap {
            table: self.table.clone(),
        }
    }
}

impl<K: Hashable, V> HashMap<K, V> {
    /// Construct an empty map with the default capacity of 49 buckets.
    pub fn new() -> Self {
        HashMap {
            table: Table::new(),
        }
    }

    /// Construct an empty map sized for about `size` entries. The starting
    /// bucket count is `max(49, 2 * size - 1)`.
    pub fn with_expected_size(size: usize) -> Self {
        HashMap {
            table: Table::with_expected_size(size),
        }
    }

    /// Retrieve a value from the map. If the value exists, a reference is returned
    /// as `Some(&V)`, otherwise if not present `None` is returned.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.table.search(k).map(|p| &p.value)
    }

    /// Get a mutable reference to a value in the map.
    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        self.table.search_mut(k).map(|p| &mut p.value)
    }

    /// Assert if a key exists in the map.
    pub fn contains_key(&self, k: &K) -> bool {
        self.table.contains(k)
    }

    /// Insert or update a value by key. If the key was present its value is
    /// replaced in place (the stored key is kept) and the old value returned
    /// as `Some(V)`. Otherwise the pair is added and `None` is returned.
    ///
    /// Adding a pair may grow and rehash the whole map before this returns.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        if let Some(p) = self.table.search_mut(&k) {
            return Some(mem::replace(&mut p.value, v));
        }
        self.table.insert_unique(Pair::new(k, v));
        None
    }

    /// Remove a key if it exists in the map. If the value exists, we return it as `Some(V)`,
    /// and if it did not exist, we return `None`
    pub fn remove(&mut self, k: &K) -> Option<V> {
        self.table.remove(k).map(|p| p.value)
    }

    /// Returns the current number of k:v pairs in the map
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Determine if the map is currently empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Reset this map to an empty state with the default capacity. A size
    /// given to `with_expected_size` is not restored.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Iterator over `(&K, &V)`, in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// A copy of every key, in unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.table.collect_with(|p| p.key.clone())
    }

    /// A copy of every value, in unspecified order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.table.collect_with(|p| p.value.clone())
    }

    /// A cursor over a copy of every pair as it is right now. Later changes to
    /// the map are not seen by the returned iterator.
    pub fn snapshot(&self) -> SeqIter<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        SeqIter::new(self.table.collect_with(|p| p.clone()))
    }
}

/// Iterator over references to Key Value pairs stored in the map.
pub struct Iter<'a, K, V> {
    inner: table::Iter<'a, Pair<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (&p.key, &p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Hashable, V> IntoIterator for &'a HashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hashable, V> IntoIterator for HashMap<K, V> {
    type Item = (K, V);
    type IntoIter = SeqIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        let pairs = self
            .table
            .into_entries()
            .into_iter()
            .map(Pair::into_parts)
            .collect();
        SeqIter::new(pairs)
    }
}

impl<K: Hashable, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Hashable, V> Extend<(K, V)> for HashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(k, v)| {
            let _ = self.insert(k, v);
        });
    }
}

impl<K: Hashable + Debug, V: Debug> Debug for HashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for HashMap<K, V>
where
    K: Hashable + serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for HashMap<K, V>
where
    K: Hashable + serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(crate::utils::MapCollector::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{HashMap, Pair};
    use crate::hashable::Hashable;

    #[test]
    fn test_hashmap_basic_write() {
        let mut hmap: HashMap<usize, usize> = HashMap::new();

        hmap.insert(10, 10);
        hmap.insert(15, 15);

        assert!(hmap.contains_key(&10));
        assert!(hmap.contains_key(&15));
        assert!(!hmap.contains_key(&20));

        assert!(hmap.get(&10) == Some(&10));
        {
            let v = hmap.get_mut(&10).unwrap();
            *v = 11;
        }
        assert!(hmap.get(&10) == Some(&11));

        assert!(hmap.remove(&10).is_some());
        assert!(!hmap.contains_key(&10));
        assert!(hmap.contains_key(&15));

        assert!(hmap.remove(&30).is_none());

        hmap.clear();
        assert!(!hmap.contains_key(&10));
        assert!(!hmap.contains_key(&15));
        assert!(hmap.is_empty());
    }

    #[test]
    fn test_hashmap_overwrite_keeps_len() {
        let mut hmap: HashMap<String, u32> = HashMap::new();
        assert_eq!(hmap.insert("a".to_string(), 1), None);
        assert_eq!(hmap.insert("a".to_string(), 2), Some(1));
        assert_eq!(hmap.len(), 1);
        assert_eq!(hmap.get(&"a".to_string()), Some(&2));
    }

    #[test]
    fn test_hashmap_overwrite_keeps_stored_key() {
        // Equal under Eq, but distinguishable by `tag`.
        #[derive(Debug, Clone)]
        struct Tagged {
            id: i64,
            tag: &'static str,
        }

        impl PartialEq for Tagged {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for Tagged {}

        impl Hashable for Tagged {
            fn hash_code(&self) -> i64 {
                self.id
            }
        }

        let mut hmap = HashMap::new();
        hmap.insert(Tagged { id: 1, tag: "first" }, 1);
        hmap.insert(Tagged { id: 1, tag: "second" }, 2);
        let (k, v) = hmap.iter().next().unwrap();
        assert_eq!(k.tag, "first");
        assert_eq!(*v, 2);
    }

    #[test]
    fn test_hashmap_remove_absent_is_noop() {
        let mut hmap: HashMap<i32, i32> = (0..10).map(|i| (i, i * 2)).collect();
        assert_eq!(hmap.remove(&99), None);
        assert_eq!(hmap.len(), 10);
        for i in 0..10 {
            assert_eq!(hmap.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_hashmap_rehash_at_37th_insert() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut hmap: HashMap<u32, u32> = HashMap::new();
        for i in 0..36 {
            hmap.insert(i, i);
        }
        assert_eq!(hmap.capacity(), 49);
        hmap.insert(36, 36);
        assert_eq!(hmap.capacity(), 97);
        hmap.insert(37, 37);
        assert_eq!(hmap.capacity(), 97);
        for i in 0..38 {
            assert_eq!(hmap.get(&i), Some(&i));
        }
        hmap.table.verify();
    }

    #[test]
    fn test_hashmap_expected_size() {
        let hmap: HashMap<u32, ()> = HashMap::with_expected_size(10);
        assert_eq!(hmap.capacity(), 49);
        let mut hmap: HashMap<u32, ()> = HashMap::with_expected_size(60);
        assert_eq!(hmap.capacity(), 119);
        hmap.insert(1, ());
        hmap.clear();
        assert_eq!(hmap.capacity(), 49);
    }

    #[test]
    fn test_hashmap_negative_keys() {
        let mut hmap: HashMap<i64, i64> = HashMap::new();
        for i in -200..200 {
            hmap.insert(i, -i);
        }
        for i in -200..200 {
            assert_eq!(hmap.get(&i), Some(&-i));
        }
        hmap.table.verify();
    }

    #[test]
    fn test_hashmap_keys_values_snapshot() {
        let mut hmap: HashMap<u8, char> = HashMap::new();
        hmap.insert(1, 'a');
        hmap.insert(2, 'b');

        let mut keys = hmap.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2]);

        let mut values = hmap.values();
        values.sort_unstable();
        assert_eq!(values, vec!['a', 'b']);

        let mut snap = hmap.snapshot();
        hmap.insert(3, 'c');
        hmap.remove(&1);
        assert_eq!(snap.remaining(), 2);
        let mut seen = Vec::new();
        while snap.has_next() {
            seen.push(snap.next_item().into_parts());
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn test_hashmap_basic_iter() {
        let mut hmap: HashMap<usize, usize> = HashMap::new();
        assert!(hmap.iter().count() == 0);

        hmap.insert(10, 10);
        hmap.insert(15, 15);

        assert!(hmap.iter().count() == 2);
        assert_eq!(hmap.iter().len(), 2);
    }

    #[test]
    fn test_hashmap_from_iter() {
        let hmap: HashMap<usize, usize> = vec![(10, 10), (15, 15), (20, 20)].into_iter().collect();
        assert!(hmap.contains_key(&10));
        assert!(hmap.contains_key(&15));
        assert!(hmap.contains_key(&20));

        let mut pairs: Vec<_> = hmap.into_iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(10, 10), (15, 15), (20, 20)]);
    }

    #[test]
    fn test_pair_parts() {
        let p = Pair::new("k", 3);
        assert_eq!(p.key(), &"k");
        assert_eq!(p.value(), &3);
        let t: (&str, i32) = p.into();
        assert_eq!(t, ("k", 3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_hashmap_serde() {
        let hmap: HashMap<String, u32> = vec![("a".to_string(), 1), ("b".to_string(), 2)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&hmap).unwrap();
        let back: HashMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.get(&"b".to_string()), Some(&2));
    }
}
