//! The hashing and equality contract every key and element must satisfy.
//!
//! The tables in this crate never use `std::hash::Hash`. Instead a key supplies
//! its own integer hash code through [`Hashable`], and the table resolves
//! collisions inside a bucket with the type's `Eq` implementation. A derived
//! `PartialEq`/`Eq` is a structural (deep) comparison, which is what the tables
//! expect.
//!
//! The one rule callers must keep: values that compare equal MUST return the
//! same hash code. The tables do not (and can not) verify this, and breaking it
//! causes lookups to silently miss.

use std::rc::Rc;
use std::sync::Arc;

/// A type that can produce a deterministic integer hash code.
///
/// # Examples
/// ```
/// use chaintable::Hashable;
///
/// #[derive(PartialEq, Eq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Hashable for Point {
///     fn hash_code(&self) -> i64 {
///         (self.x, self.y).hash_code()
///     }
/// }
///
/// assert_eq!(Point { x: 1, y: 2 }.hash_code(), Point { x: 1, y: 2 }.hash_code());
/// ```
pub trait Hashable: Eq {
    /// Hash code for this value. May be negative.
    fn hash_code(&self) -> i64;
}

// Multiplier for combining hash codes of compound values.
const COMBINE: i64 = 31;

#[inline]
pub(crate) fn combine(acc: i64, h: i64) -> i64 {
    acc.wrapping_mul(COMBINE).wrapping_add(h)
}

macro_rules! hashable_as_i64 {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                #[inline]
                fn hash_code(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

hashable_as_i64!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Hashable for i128 {
    fn hash_code(&self) -> i64 {
        combine(*self as i64, (*self >> 64) as i64)
    }
}

impl Hashable for u128 {
    fn hash_code(&self) -> i64 {
        combine(*self as i64, (*self >> 64) as i64)
    }
}

impl Hashable for bool {
    fn hash_code(&self) -> i64 {
        *self as i64
    }
}

impl Hashable for char {
    fn hash_code(&self) -> i64 {
        *self as i64
    }
}

impl Hashable for () {
    fn hash_code(&self) -> i64 {
        0
    }
}

impl Hashable for str {
    fn hash_code(&self) -> i64 {
        self.bytes().fold(0, |acc, b| combine(acc, b as i64))
    }
}

impl Hashable for String {
    fn hash_code(&self) -> i64 {
        self.as_str().hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    #[inline]
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    #[inline]
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for Rc<T> {
    #[inline]
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for Arc<T> {
    #[inline]
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

impl<T: Hashable> Hashable for Option<T> {
    fn hash_code(&self) -> i64 {
        match self {
            // Keep None apart from Some(0).
            None => i64::MIN,
            Some(t) => t.hash_code(),
        }
    }
}

impl<T: Hashable> Hashable for [T] {
    fn hash_code(&self) -> i64 {
        self.iter().fold(1, |acc, t| combine(acc, t.hash_code()))
    }
}

impl<T: Hashable> Hashable for Vec<T> {
    fn hash_code(&self) -> i64 {
        self.as_slice().hash_code()
    }
}

impl<T: Hashable, const N: usize> Hashable for [T; N] {
    fn hash_code(&self) -> i64 {
        self.as_slice().hash_code()
    }
}

macro_rules! hashable_tuple {
    ($($name:ident)+) => {
        impl<$($name: Hashable),+> Hashable for ($($name,)+) {
            #[allow(non_snake_case)]
            fn hash_code(&self) -> i64 {
                let ($($name,)+) = self;
                let acc = 1;
                $( let acc = combine(acc, $name.hash_code()); )+
                acc
            }
        }
    };
}

hashable_tuple!(A);
hashable_tuple!(A B);
hashable_tuple!(A B C);
hashable_tuple!(A B C D);

#[cfg(feature = "foldhash")]
pub use self::native::Native;

#[cfg(feature = "foldhash")]
mod native {
    use super::Hashable;
    use foldhash::fast::FixedState;
    use std::hash::{BuildHasher, Hash};
    use std::ops::Deref;

    const NATIVE_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

    /// Adapter that lets any `Hash + Eq` type act as a key.
    ///
    /// The hash code is taken from a fixed seed `foldhash` hasher, so it is
    /// stable for the life of the process (but not across versions of
    /// `foldhash`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
    pub struct Native<T>(pub T);

    impl<T> Native<T> {
        /// Unwrap the adapted value.
        pub fn into_inner(self) -> T {
            self.0
        }
    }

    impl<T> Deref for Native<T> {
        type Target = T;

        fn deref(&self) -> &T {
            &self.0
        }
    }

    impl<T: Hash + Eq> Hashable for Native<T> {
        fn hash_code(&self) -> i64 {
            FixedState::with_seed(NATIVE_SEED).hash_one(&self.0) as i64
        }
    }
}
