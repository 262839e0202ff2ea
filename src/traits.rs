//! Common traits and error types for the containers
//!
//! - [`OrderedMap`]: the map contract shared by [`RbTreeMap`], [`SplayTreeMap`]
//!   and [`Bst`]
//! - [`HeapError`]: errors returned by handle-based heap operations
//!
//! Lookups on [`OrderedMap`] take `&mut self` because a self-adjusting map
//! restructures itself on every access. The concrete types still offer
//! `&self` lookups where their algorithm allows it.
//!
//! [`RbTreeMap`]: crate::RbTreeMap
//! [`SplayTreeMap`]: crate::SplayTreeMap
//! [`Bst`]: crate::Bst

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Ordered key-value map contract
///
/// Absent keys are always reported as `None`; no operation fails on a
/// missing key.
///
/// # Example
///
/// ```rust
/// use rust_ordered_containers::{OrderedMap, RbTreeMap, SplayTreeMap};
///
/// fn fill<M: OrderedMap<i32, &'static str>>(map: &mut M) {
///     map.insert(2, "two");
///     map.insert(1, "one");
/// }
///
/// let mut rb = RbTreeMap::new();
/// let mut splay = SplayTreeMap::new();
/// fill(&mut rb);
/// fill(&mut splay);
/// assert_eq!(OrderedMap::min_key(&mut rb), Some(&1));
/// assert_eq!(OrderedMap::min_key(&mut splay), Some(&1));
/// ```
pub trait OrderedMap<K, V> {
    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of levels in the tree (0 when empty)
    fn height(&self) -> usize;

    /// Inserts `value` under `key`, returning the previous value for an equal key
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up the value stored under `key`
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns true if `key` is present
    fn contains_key(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns the smallest key
    fn min_key(&mut self) -> Option<&K>;

    /// Returns the largest key
    fn max_key(&mut self) -> Option<&K>;

    /// Collects all entries in increasing key order
    fn entries(&self) -> Vec<(&K, &V)>;

    /// Verifies the structural invariants of the map
    fn check_invariants(&self) -> Result<(), String>;
}
