//! Chaintable - Separately chained hash maps and sets
//!
//! The containers in this crate do not rely on `std::hash::Hash`. Each key
//! (or set element) hands out its own integer hash code through the
//! [`Hashable`] trait, and keys whose codes collide are told apart with their
//! `Eq` implementation. This makes the containers usable for types that have
//! a natural hash code, or that are not natively hashable at all.
//!
//! Storage is a classic bucket array with separate chaining. The table starts
//! with 49 buckets, and once more than three quarters of that is used the table
//! is rebuilt at `2 * capacity - 1` buckets, so the bucket count always stays
//! odd.
//!
//! Every container comes in two flavours:
//!
//! * [`HashMap`] / [`HashSet`] - no locking, use from one thread (or behind
//!   your own lock).
//! * [`ConcurrentHashMap`] / [`ConcurrentHashSet`] - the same table behind a
//!   single `RwLock`. Reads run in parallel, writes are serialised. Each call
//!   holds the lock only for its own duration.
//!
//! Snapshots of a container are returned as a [`SeqIter`], a forward-only
//! cursor over data copied at the time of the call.
//!
//! # Features
//! This library provides optional content, selected with features.
//!
//! * `asynch` - async concurrent variants backed by `tokio`'s `RwLock`
//! * `foldhash` - the [`Native`] adapter, to use any `Hash + Eq` type as a key
//! * `serde` - `Serialize` and `Deserialize` for every container
//!
//! `asynch` and `foldhash` are enabled by default.

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

pub mod hashable;
pub use hashable::Hashable;
#[cfg(feature = "foldhash")]
pub use hashable::Native;

pub mod iter;
pub use iter::SeqIter;

pub mod internals;

#[cfg(feature = "serde")]
mod utils;

pub mod hashmap;
pub use hashmap::{ConcurrentHashMap, HashMap, Pair};

pub mod hashset;
pub use hashset::{ConcurrentHashSet, HashSet};
