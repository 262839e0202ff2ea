//! Ordered containers for Rust
//!
//! This crate provides classical ordered containers built around an injected
//! comparator, plus a Fibonacci-heap priority queue with handle-based
//! priority updates.
//!
//! # Containers
//!
//! - **RbTreeMap**: left-leaning red-black tree; O(log n) worst-case insert, lookup and removal
//! - **SplayTreeMap**: self-adjusting top-down splay tree; O(log n) amortized, recently used keys are cheap
//! - **Bst**: unbalanced binary search tree; O(depth) everything, the baseline for the other maps
//! - **FibonacciHeap**: O(1) amortized insert and decrease-priority; O(log n) amortized delete-min
//! - **PriorityQueue**: a Fibonacci heap addressed by key instead of by handle
//! - **Deque**: circular doubly-linked deque with O(1) operations at both ends
//!
//! All maps implement [`OrderedMap`], and every ordered container accepts a
//! [`Comparator`] at construction (see [`compare`]).
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let a = heap.insert("a", 10);
//! heap.insert("b", 20);
//! heap.decrease_priority(a, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&"a", &1)));
//! assert_eq!(heap.delete_min(), Some(("a", 1)));
//! assert_eq!(heap.delete_min(), Some(("b", 20)));
//! assert_eq!(heap.delete_min(), None);
//! ```

pub mod bst;
pub mod compare;
pub mod deque;
pub mod fibonacci;
pub mod priority_queue;
pub mod rb_tree;
pub mod splay_tree;
mod storage;
pub mod traits;

pub use bst::Bst;
pub use compare::{Comparator, Natural};
pub use deque::Deque;
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use priority_queue::PriorityQueue;
pub use rb_tree::RbTreeMap;
pub use splay_tree::SplayTreeMap;
pub use traits::{HeapError, OrderedMap};
