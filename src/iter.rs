//! Snapshot iterators.
//!
//! A [`SeqIter`] is a forward-only, single pass cursor over a sequence that was
//! fully materialized when the iterator was created. Mutating the container
//! afterwards never affects an iterator already handed out. To start again,
//! ask the container for a new one.

use std::fmt;
use std::iter::FusedIterator;

/// A forward-only cursor over a materialized snapshot.
///
/// This offers both the explicit `has_next` / `next_item` cursor protocol and
/// the regular [`Iterator`] interface.
///
/// # Examples
/// ```
/// use chaintable::iter::SeqIter;
///
/// let mut it = SeqIter::new(vec![1, 2]);
/// assert!(it.has_next());
/// assert_eq!(it.next_item(), 1);
/// assert_eq!(it.next(), Some(2));
/// assert!(!it.has_next());
/// ```
pub struct SeqIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> SeqIter<T> {
    /// Create a cursor positioned before the first element of `items`.
    pub fn new(items: Vec<T>) -> Self {
        SeqIter {
            inner: items.into_iter(),
        }
    }

    /// `true` if another call to `next_item` will succeed. Has no side effects.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.inner.len() > 0
    }

    /// Number of elements not yet yielded.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }

    /// Advance by one and return the element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted. Check `has_next` first.
    pub fn next_item(&mut self) -> T {
        match self.inner.next() {
            Some(t) => t,
            None => panic!("SeqIter::next_item called with no more elements"),
        }
    }
}

impl<T> From<Vec<T>> for SeqIter<T> {
    fn from(items: Vec<T>) -> Self {
        SeqIter::new(items)
    }
}

impl<T> Iterator for SeqIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for SeqIter<T> {}

impl<T> FusedIterator for SeqIter<T> {}

impl<T: fmt::Debug> fmt::Debug for SeqIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SeqIter;

    #[test]
    fn test_seqiter_cursor_protocol() {
        let mut it = SeqIter::new(vec!["a", "b", "c"]);
        let mut seen = Vec::new();
        while it.has_next() {
            seen.push(it.next_item());
        }
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(it.remaining(), 0);
        assert!(it.next().is_none());
    }

    #[test]
    fn test_seqiter_has_next_is_pure() {
        let it = SeqIter::new(vec![1]);
        assert!(it.has_next());
        assert!(it.has_next());
        assert_eq!(it.remaining(), 1);
    }

    #[test]
    fn test_seqiter_empty() {
        let it: SeqIter<u8> = SeqIter::new(Vec::new());
        assert!(!it.has_next());
        assert_eq!(it.len(), 0);
    }

    #[test]
    #[should_panic(expected = "no more elements")]
    fn test_seqiter_next_past_end_panics() {
        let mut it = SeqIter::new(vec![1]);
        let _ = it.next_item();
        let _ = it.next_item();
    }
}
