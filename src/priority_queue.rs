//! Keyed priority queue
//!
//! [`PriorityQueue`] pairs a [`FibonacciHeap`] with an index from each key to
//! its heap handle, so priorities can be changed and entries deleted by key
//! rather than by handle. Keys are unique: pushing a key that is already
//! queued changes its priority.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::PriorityQueue;
//!
//! let mut q = PriorityQueue::new();
//! q.push("car", 50);
//! q.push("train", 50);
//! q.push("bike", 10);
//! assert_eq!(q.min(), Some((&"bike", &10)));
//!
//! q.change_priority("car", 0);
//! assert_eq!(q.min(), Some((&"car", &0)));
//! ```

use crate::compare::{Comparator, Natural};
use crate::fibonacci::{self, FibonacciHandle, FibonacciHeap};
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// Min-priority queue addressed by key
#[derive(Clone)]
pub struct PriorityQueue<K, P, C = Natural> {
    heap: FibonacciHeap<K, P, C>,
    index: FxHashMap<K, FibonacciHandle>,
}

impl<K: Hash + Eq + Clone, P: Ord> PriorityQueue<K, P> {
    /// Creates an empty queue ordered by `P`'s natural order
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Hash + Eq + Clone, P: Ord> Default for PriorityQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, P, C: Comparator<P>> PriorityQueue<K, P, C> {
    /// Creates an empty queue ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            heap: FibonacciHeap::with_comparator(cmp),
            index: FxHashMap::default(),
        }
    }

    /// Returns the number of queued keys
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no key is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Queues `key` with `priority`
    ///
    /// If `key` is already queued this is [`change_priority`](Self::change_priority).
    pub fn push(&mut self, key: K, priority: P) {
        if let Some(&handle) = self.index.get(&key) {
            self.heap.reprioritize(handle, priority);
            return;
        }
        let handle = self.heap.insert(key.clone(), priority);
        self.index.insert(key, handle);
    }

    /// Sets the priority of `key`, queueing it if absent
    ///
    /// A lower priority is applied in place in O(1) amortized time. A higher
    /// priority removes and reinserts the entry in O(log n) amortized time.
    pub fn change_priority(&mut self, key: K, priority: P) {
        self.push(key, priority)
    }

    /// Returns the priority of `key`
    pub fn priority<Q>(&self, key: &Q) -> Option<&P>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.heap.priority(*handle)
    }

    /// Returns true if `key` is queued
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the key with the minimum priority and that priority
    pub fn min(&self) -> Option<(&K, &P)> {
        self.heap.find_min()
    }

    /// Returns the key with the minimum priority
    pub fn min_key(&self) -> Option<&K> {
        self.min().map(|(key, _)| key)
    }

    /// Returns the minimum priority
    pub fn min_priority(&self) -> Option<&P> {
        self.min().map(|(_, priority)| priority)
    }

    /// Removes and returns the key with the minimum priority
    pub fn delete_min(&mut self) -> Option<(K, P)> {
        let (key, priority) = self.heap.delete_min()?;
        self.index.remove(&key);
        Some((key, priority))
    }

    /// Removes the key with the minimum priority, returning only the key
    pub fn delete_min_return_key(&mut self) -> Option<K> {
        self.delete_min().map(|(key, _)| key)
    }

    /// Removes the key with the minimum priority, returning only the priority
    pub fn delete_min_return_priority(&mut self) -> Option<P> {
        self.delete_min().map(|(_, priority)| priority)
    }

    /// Removes `key`, returning it with its priority
    ///
    /// Returns `None` if `key` is not queued; deleting twice is harmless.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<(K, P)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        self.heap.delete(handle).ok()
    }

    /// Iterates over all `(key, priority)` pairs in heap order (not sorted)
    pub fn iter(&self) -> fibonacci::Iter<'_, K, P> {
        self.heap.iter()
    }

    /// Verifies the heap structure and that the key index matches it
    pub fn check_invariants(&self) -> Result<(), String> {
        self.heap.check_invariants()?;
        if self.index.len() != self.heap.len() {
            return Err(format!(
                "index holds {} keys but the heap holds {} elements",
                self.index.len(),
                self.heap.len()
            ));
        }
        for (key, &handle) in &self.index {
            match self.heap.get(handle) {
                Some((item, _)) if item == key => {}
                _ => return Err("index entry does not address its key".to_string()),
            }
        }
        Ok(())
    }
}

impl<K, P, C> PriorityQueue<K, P, C>
where
    K: Hash + Eq + Clone + fmt::Display,
    P: fmt::Display,
    C: Comparator<P>,
{
    /// Renders the underlying forest as a Graphviz `digraph`
    ///
    /// See [`FibonacciHeap::to_dot`].
    pub fn to_dot(&self) -> String {
        self.heap.to_dot()
    }
}

impl<K, P, C> fmt::Debug for PriorityQueue<K, P, C>
where
    K: Hash + Eq + Clone + fmt::Debug,
    P: fmt::Debug,
    C: Comparator<P>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&K, &P)> = self.iter().collect();
        entries.sort_by(|a, b| self.heap.comparator().compare(a.1, b.1));
        f.debug_map().entries(entries).finish()
    }
}

impl<'a, K: Hash + Eq + Clone, P, C: Comparator<P>> IntoIterator for &'a PriorityQueue<K, P, C> {
    type Item = (&'a K, &'a P);
    type IntoIter = fibonacci::Iter<'a, K, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq + Clone, P, C: Comparator<P>> Extend<(K, P)> for PriorityQueue<K, P, C> {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, priority) in iter {
            self.push(key, priority);
        }
    }
}

impl<K: Hash + Eq + Clone, P: Ord> FromIterator<(K, P)> for PriorityQueue<K, P> {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
