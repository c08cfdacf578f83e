//! The bucket chained table shared by every map and set in this crate.
//!
//! Layout is an array of buckets, where each bucket is a small vector of the
//! entries whose hash code maps to that slot. Collisions are resolved by a
//! linear scan of the bucket with `Eq`.
//!
//! ```text
//!  slot   0      1      2            48
//!       [   ]  [ e ]  [   ]  ...  [ e e ]
//!                ^                  ^ ^
//!                hash % 49 == 1     hash % 49 == 48
//! ```
//!
//! Capacity starts at 49 and always stays odd. Whenever an insert pushes the
//! load factor above 3/4 the whole table is rebuilt at `2 * capacity - 1`
//! buckets before the insert returns.

use std::fmt::Debug;
use std::mem;
use std::slice;

use smallvec::SmallVec;
use tracing::trace;

use crate::hashable::Hashable;

/// Bucket count of a fresh (or cleared) table.
pub const DEFAULT_CAPACITY: usize = 49;

// Load factor threshold of 0.75, kept as a ratio to stay in integers.
const LOAD_NUMERATOR: usize = 3;
const LOAD_DENOMINATOR: usize = 4;

// Most buckets hold zero or one entry at a 3/4 load factor.
const DEFAULT_STACK_ALLOC: usize = 1;

pub(crate) type Bucket<E> = SmallVec<[E; DEFAULT_STACK_ALLOC]>;

/// Something that can live in a [`Table`]: it exposes the key it is found by.
pub trait Entry {
    /// The lookup key of this entry.
    type Key: Hashable + ?Sized;

    /// Borrow the lookup key.
    fn key(&self) -> &Self::Key;
}

/// Map the hash code `h` to a slot in `[0, capacity)`.
///
/// Hash codes may be negative, so this is the Euclidean remainder rather than
/// `%`.
#[inline]
pub fn slot_of(h: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    h.rem_euclid(capacity as i64) as usize
}

/// Initial capacity for a table expected to hold `hint` entries. Always odd,
/// including when `2 * hint - 1` saturates.
#[inline]
pub fn capacity_for(hint: usize) -> usize {
    hint.saturating_mul(2)
        .saturating_sub(1)
        .max(DEFAULT_CAPACITY)
        | 1
}

/// A separately chained hash table of `E`.
///
/// This type performs no locking. It is safe to use from one thread, or
/// behind external synchronisation such as the concurrent wrappers.
#[derive(Clone)]
pub struct Table<E> {
    buckets: Vec<Bucket<E>>,
    len: usize,
}

impl<E: Entry> Default for Table<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entry> Table<E> {
    /// An empty table of the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty table sized for `hint` entries. See [`capacity_for`].
    pub fn with_expected_size(hint: usize) -> Self {
        Self::with_capacity(capacity_for(hint))
    }

    fn with_capacity(capacity: usize) -> Self {
        Table {
            buckets: empty_buckets(capacity),
            len: 0,
        }
    }

    /// Number of entries stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if no entries are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn slot(&self, k: &E::Key) -> usize {
        slot_of(k.hash_code(), self.buckets.len())
    }

    /// Find the entry whose key equals `k`.
    pub fn search(&self, k: &E::Key) -> Option<&E> {
        let idx = self.slot(k);
        self.buckets[idx].iter().find(|e| e.key() == k)
    }

    /// Find the entry whose key equals `k` for mutation.
    ///
    /// Callers must not change the key in a way that alters its hash code or
    /// equality.
    pub fn search_mut(&mut self, k: &E::Key) -> Option<&mut E> {
        let idx = self.slot(k);
        self.buckets[idx].iter_mut().find(|e| e.key() == k)
    }

    /// `true` if an entry with key `k` is present.
    pub fn contains(&self, k: &E::Key) -> bool {
        self.search(k).is_some()
    }

    /// Append an entry whose key is known to be absent, growing the table if
    /// the load factor is exceeded afterwards.
    pub fn insert_unique(&mut self, e: E) {
        debug_assert!(!self.contains(e.key()));
        self.place(e);
        if self.overloaded() {
            self.rehash();
        }
    }

    /// Remove and return the entry with key `k`. Order of the remaining
    /// entries in that bucket may change.
    pub fn remove(&mut self, k: &E::Key) -> Option<E> {
        let idx = self.slot(k);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|e| e.key() == k)?;
        let e = bucket.swap_remove(pos);
        self.len -= 1;
        Some(e)
    }

    /// Drop every entry and return to the default capacity. Any size hint
    /// given at construction is not restored.
    pub fn clear(&mut self) {
        trace!(capacity = self.buckets.len(), len = self.len, "clear");
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.len = 0;
    }

    /// Entries in bucket order, then in-bucket order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            buckets: self.buckets.iter(),
            current: <&[E]>::default().iter(),
            remaining: self.len,
        }
    }

    /// Materialize a projection of every entry, in bucket order.
    pub fn collect_with<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&E) -> T,
    {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.iter().map(f));
        out
    }

    /// Consume the table, yielding every entry in bucket order.
    pub fn into_entries(self) -> Vec<E> {
        let mut out = Vec::with_capacity(self.len);
        for bucket in self.buckets {
            out.extend(bucket);
        }
        out
    }

    // Push into the owning bucket without any duplicate or load checks. Both
    // insert and rehash go through here so placement stays in one place.
    fn place(&mut self, e: E) {
        let idx = self.slot(e.key());
        self.buckets[idx].push(e);
        self.len += 1;
    }

    #[inline]
    fn overloaded(&self) -> bool {
        self.len * LOAD_DENOMINATOR > self.buckets.len() * LOAD_NUMERATOR
    }

    fn rehash(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2 - 1;
        trace!(
            from = old_capacity,
            to = new_capacity,
            len = self.len,
            "rehash"
        );
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let expect = self.len;
        self.len = 0;
        for bucket in old {
            for e in bucket {
                self.place(e);
            }
        }
        debug_assert_eq!(expect, self.len);
        // Growth is at least 2x - 1 so one rebuild always restores the bound.
        debug_assert!(!self.overloaded());
    }

    #[cfg(test)]
    pub(crate) fn verify(&self) {
        assert!(self.buckets.len() % 2 == 1);
        assert!(!self.overloaded());
        let mut count = 0;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (i, e) in bucket.iter().enumerate() {
                assert_eq!(slot_of(e.key().hash_code(), self.buckets.len()), idx);
                assert!(bucket.iter().skip(i + 1).all(|o| o.key() != e.key()));
                count += 1;
            }
        }
        assert_eq!(count, self.len);
    }
}

impl<E: Entry + Debug> Debug for Table<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over the entries of a [`Table`].
pub struct Iter<'a, E> {
    buckets: slice::Iter<'a, Bucket<E>>,
    current: slice::Iter<'a, E>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some(e);
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

fn empty_buckets<E>(capacity: usize) -> Vec<Bucket<E>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, SmallVec::new);
    buckets
}
