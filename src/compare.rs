//! Three-way comparators for ordered containers
//!
//! Every ordered container in this crate takes its ordering as a value at
//! construction time instead of relying on `Ord` alone. This lets callers
//! order keys that are not `Ord`, or order `Ord` keys differently (reversed,
//! by a projection, case-insensitively, ...).
//!
//! - [`Natural`]: delegates to `Ord`, the default for every container
//! - any `Fn(&T, &T) -> Ordering` closure is a comparator as well
//!
//! The comparator must be a strict total order. A comparator that is not
//! (e.g. one that says `a < b` and `b < a`) silently corrupts the container;
//! `check_invariants` on the container will report it.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::RbTreeMap;
//!
//! // Longest string first
//! let mut map = RbTreeMap::with_comparator(|a: &String, b: &String| b.len().cmp(&a.len()));
//! map.insert("ab".to_string(), 2);
//! map.insert("abcd".to_string(), 4);
//! assert_eq!(map.min_key().map(String::as_str), Some("abcd"));
//! ```

use std::cmp::Ordering;

/// A three-way comparison over `T`
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`
    fn compare(&self, a: &T, b: &T) -> Ordering;

    #[inline]
    fn lt(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    #[inline]
    fn le(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) != Ordering::Greater
    }
}

/// The natural ordering of an `Ord` type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
