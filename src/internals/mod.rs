//! The unlocked storage engine behind every container in this crate.
//!
//! Nothing here takes a lock. The public containers in
//! [`hashmap`](crate::hashmap) and [`hashset`](crate::hashset) wrap these
//! types, and are what you normally want.

pub mod table;
