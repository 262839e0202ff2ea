//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and find_min
//! - O(1) amortized decrease_priority
//! - O(log n) amortized delete_min, delete and priority increase
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, as are the children of every node. The heap
//! maintains a key to the minimum root, which doubles as the entry point into
//! the root list.
//!
//! Nodes live in a generational arena ([`slotmap`]). A [`FibonacciHandle`] is the
//! arena key of its node, so a handle whose element has been removed is detected
//! and reported as [`HeapError::InvalidHandle`] instead of aliasing another
//! element.
//!
//! # Priority changes
//!
//! Decreasing a priority cuts the node from its parent (if heap order is
//! violated) and performs cascading cuts up the ancestor chain. Increasing a
//! priority removes the node from the structure and reinserts it with the new
//! priority; the handle stays valid across the move.

use crate::compare::{Comparator, Natural};
use crate::storage::{self, Arena, NodeKey, RingNode};
use crate::traits::HeapError;
use slotmap::SecondaryMap;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt::{self, Write as _};

/// Handle to an element in a Fibonacci heap
///
/// Handles are tied to the heap that issued them. A handle stays valid until
/// its element is removed by [`FibonacciHeap::delete_min`],
/// [`FibonacciHeap::delete`] or [`FibonacciHeap::clear`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    key: NodeKey,
}

#[derive(Clone)]
struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    marked: bool,
}

impl<T, P> Node<T, P> {
    fn new(key: NodeKey, item: T, priority: P) -> Self {
        Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        }
    }
}

impl<T, P> RingNode for Node<T, P> {
    #[inline]
    fn left(&self) -> NodeKey {
        self.left
    }

    #[inline]
    fn right(&self) -> NodeKey {
        self.right
    }

    #[inline]
    fn set_left(&mut self, key: NodeKey) {
        self.left = key;
    }

    #[inline]
    fn set_right(&mut self, key: NodeKey) {
        self.right = key;
    }
}

/// Fibonacci Heap
///
/// A min-heap of `(item, priority)` pairs ordered by the comparator `C`.
///
/// # Example
///
/// ```rust
/// use rust_ordered_containers::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert("item", 5);
/// heap.insert("other", 3);
/// heap.decrease_priority(handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&"item", &1)));
/// assert_eq!(heap.delete_min(), Some(("item", 1)));
/// ```
///
/// Cloning copies the forest node for node, so a handle issued by the
/// original addresses the same element in the clone.
#[derive(Clone)]
pub struct FibonacciHeap<T, P, C = Natural> {
    nodes: Arena<Node<T, P>>,
    min: Option<NodeKey>,
    cmp: C,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty heap ordered by `P`'s natural order
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity_and_key(capacity),
            min: None,
            cmp: Natural,
        }
    }
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C: Comparator<P>> FibonacciHeap<T, P, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Arena::with_key(),
            min: None,
            cmp,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes every element, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    /// Inserts `item` with `priority`, returning a handle to it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, item: T, priority: P) -> FibonacciHandle {
        let key = self
            .nodes
            .insert_with_key(|key| Node::new(key, item, priority));
        self.add_root(key);
        FibonacciHandle { key }
    }

    /// Returns the element with the minimum priority without removing it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn find_min(&self) -> Option<(&T, &P)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.item, &node.priority)
        })
    }

    /// Removes and returns the element with the minimum priority
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete_min(&mut self) -> Option<(T, P)> {
        let min = self.min?;

        // Add children to root list
        if let Some(child) = self.nodes[min].child.take() {
            self.nodes[min].degree = 0;
            self.orphan_ring(child);
            storage::splice(&mut self.nodes, min, child);
        }

        // Remove min from root list
        let next = storage::unlink(&mut self.nodes, min);
        self.min = None;
        let node = self.nodes.remove(min)?;

        if let Some(start) = next {
            self.consolidate(start);
        }

        Some((node.item, node.priority))
    }

    /// Lowers the priority of the element behind `handle`
    ///
    /// A `new_priority` that is not lower than the current one is not an
    /// error: it is handled like [`change_priority`](Self::change_priority),
    /// which moves the element by deleting and reinserting it.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was removed.
    ///
    /// # Time Complexity
    /// O(1) amortized for an actual decrease
    pub fn decrease_priority(
        &mut self,
        handle: FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        self.change_priority(handle, new_priority)
    }

    /// Sets the priority of the element behind `handle`
    ///
    /// Decreases are done in place with cascading cuts. Increases detach the
    /// node from the forest and reinsert it as a new root. The handle remains
    /// valid either way.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was removed.
    ///
    /// # Time Complexity
    /// O(1) amortized for a decrease, O(log n) amortized for an increase
    pub fn change_priority(
        &mut self,
        handle: FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        if !self.nodes.contains_key(handle.key) {
            return Err(HeapError::InvalidHandle);
        }
        self.reprioritize(handle, new_priority);
        Ok(())
    }

    /// Sets the priority of a handle known to be live
    pub(crate) fn reprioritize(&mut self, handle: FibonacciHandle, new_priority: P) {
        let key = handle.key;
        match self.cmp.compare(&new_priority, &self.nodes[key].priority) {
            Ordering::Less => self.decrease(key, new_priority),
            Ordering::Equal => self.nodes[key].priority = new_priority,
            Ordering::Greater => {
                self.detach(key);
                self.nodes[key].priority = new_priority;
                self.add_root(key);
            }
        }
    }

    /// Removes the element behind `handle`, returning it
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was already removed.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: FibonacciHandle) -> Result<(T, P), HeapError> {
        if !self.nodes.contains_key(handle.key) {
            return Err(HeapError::InvalidHandle);
        }
        self.detach(handle.key);
        let node = self
            .nodes
            .remove(handle.key)
            .ok_or(HeapError::InvalidHandle)?;
        Ok((node.item, node.priority))
    }

    /// Returns the element and priority behind `handle`, if it is still present
    pub fn get(&self, handle: FibonacciHandle) -> Option<(&T, &P)> {
        self.nodes
            .get(handle.key)
            .map(|node| (&node.item, &node.priority))
    }

    /// Returns the priority of the element behind `handle`
    pub fn priority(&self, handle: FibonacciHandle) -> Option<&P> {
        self.nodes.get(handle.key).map(|node| &node.priority)
    }

    /// Returns true if the element behind `handle` is still in the heap
    pub fn contains(&self, handle: FibonacciHandle) -> bool {
        self.nodes.contains_key(handle.key)
    }

    /// Iterates over all elements in forest pre-order
    ///
    /// The order is not sorted by priority; only [`find_min`](Self::find_min)
    /// is guaranteed to be extremal.
    pub fn iter(&self) -> Iter<'_, T, P> {
        let mut stack = SmallVec::new();
        if let Some(min) = self.min {
            stack.push((min, min));
        }
        Iter {
            nodes: &self.nodes,
            stack,
            remaining: self.nodes.len(),
        }
    }

    /// Splices a singleton node into the root list, updating the minimum
    fn add_root(&mut self, key: NodeKey) {
        match self.min {
            None => self.min = Some(key),
            Some(min) => {
                storage::splice(&mut self.nodes, min, key);
                if self.cmp.lt(&self.nodes[key].priority, &self.nodes[min].priority) {
                    self.min = Some(key);
                }
            }
        }
    }

    /// Clears parent links and marks on every member of a child ring
    fn orphan_ring(&mut self, start: NodeKey) {
        let mut current = start;
        loop {
            let node = &mut self.nodes[current];
            node.parent = None;
            node.marked = false;
            current = node.right;
            if current == start {
                break;
            }
        }
    }

    /// Links trees of equal degree until all root degrees are distinct
    fn consolidate(&mut self, start: NodeKey) {
        let roots = storage::members(&self.nodes, start);
        let mut by_degree: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; degree_table_size(self.nodes.len())];

        for root in roots {
            storage::make_singleton(&mut self.nodes, root);
            let mut x = root;
            let mut degree = self.nodes[x].degree;

            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        // Ensure x has the smaller priority
                        if self.cmp.lt(&self.nodes[y].priority, &self.nodes[x].priority) {
                            std::mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                        degree += 1;
                    }
                }
            }
        }

        // Rebuild root list and find new min
        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.add_root(root);
        }
    }

    /// Links root `child` below root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        match self.nodes[parent].child {
            Some(first) => storage::splice(&mut self.nodes, first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    fn decrease(&mut self, key: NodeKey, new_priority: P) {
        self.nodes[key].priority = new_priority;

        if let Some(parent) = self.nodes[key].parent {
            if self.cmp.lt(&self.nodes[key].priority, &self.nodes[parent].priority) {
                self.cut(key);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.cmp.lt(&self.nodes[key].priority, &self.nodes[min].priority) {
                self.min = Some(key);
            }
        }
    }

    /// Cuts node from its parent and adds it to the root list
    fn cut(&mut self, key: NodeKey) {
        let Some(parent) = self.nodes[key].parent else {
            return;
        };

        let next = storage::unlink(&mut self.nodes, key);
        let p = &mut self.nodes[parent];
        if p.child == Some(key) {
            p.child = next;
        }
        p.degree -= 1;

        let node = &mut self.nodes[key];
        node.parent = None;
        node.marked = false;
        self.add_root(key);
    }

    /// Walks up from `key`, cutting marked ancestors until an unmarked one is marked
    fn cascading_cut(&mut self, mut key: NodeKey) {
        while let Some(parent) = self.nodes[key].parent {
            if !self.nodes[key].marked {
                self.nodes[key].marked = true;
                return;
            }
            self.cut(key);
            key = parent;
        }
    }

    /// Takes `key` out of the forest, leaving it as an unattached singleton
    ///
    /// Children move to the root list, the node is cut from its parent, and
    /// the minimum is recomputed if `key` held it.
    fn detach(&mut self, key: NodeKey) {
        if let Some(child) = self.nodes[key].child.take() {
            self.nodes[key].degree = 0;
            self.orphan_ring(child);
            if let Some(min) = self.min {
                storage::splice(&mut self.nodes, min, child);
            }
        }

        if let Some(parent) = self.nodes[key].parent {
            self.cut(key);
            self.cascading_cut(parent);
        }

        let next = storage::unlink(&mut self.nodes, key);
        if self.min == Some(key) {
            self.min = next.map(|start| self.scan_min(start));
        }
    }

    /// Finds the root with the smallest priority in the ring containing `start`
    fn scan_min(&self, start: NodeKey) -> NodeKey {
        let mut best = start;
        let mut current = self.nodes[start].right;
        while current != start {
            if self.cmp.lt(&self.nodes[current].priority, &self.nodes[best].priority) {
                best = current;
            }
            current = self.nodes[current].right;
        }
        best
    }

    /// Verifies the structural invariants of the forest
    ///
    /// Checks ring symmetry, parent links, degrees, heap order, that roots are
    /// unmarked, that every node is reachable, and that the minimum is correct.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(min) = self.min else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(format!("no minimum but {} nodes", self.nodes.len()))
            };
        };

        for (key, node) in self.nodes.iter() {
            if self.nodes[node.right].left != key || self.nodes[node.left].right != key {
                return Err(format!("ring links broken at {:?}", key));
            }
            match node.parent {
                Some(parent) => {
                    let p = self
                        .nodes
                        .get(parent)
                        .ok_or_else(|| format!("dangling parent of {:?}", key))?;
                    if self.cmp.lt(&node.priority, &p.priority) {
                        return Err(format!("heap order violated below {:?}", parent));
                    }
                }
                None => {
                    if node.marked {
                        return Err(format!("root {:?} is marked", key));
                    }
                }
            }
            if self.cmp.lt(&node.priority, &self.nodes[min].priority) {
                return Err(format!("{:?} is smaller than the minimum", key));
            }

            let mut degree = 0;
            if let Some(child) = node.child {
                for member in storage::members(&self.nodes, child) {
                    if self.nodes[member].parent != Some(key) {
                        return Err(format!("child {:?} has the wrong parent", member));
                    }
                    degree += 1;
                }
            }
            if degree != node.degree {
                return Err(format!(
                    "{:?} has degree {} but {} children",
                    key, node.degree, degree
                ));
            }
        }

        for root in storage::members(&self.nodes, min) {
            if self.nodes[root].parent.is_some() {
                return Err(format!("{:?} in root list has a parent", root));
            }
        }

        let reachable = self.iter().count();
        if reachable != self.nodes.len() {
            return Err(format!(
                "{} nodes reachable, {} allocated",
                reachable,
                self.nodes.len()
            ));
        }
        Ok(())
    }
}

impl<T: fmt::Display, P: fmt::Display, C: Comparator<P>> FibonacciHeap<T, P, C> {
    /// Renders the forest as a Graphviz `digraph`
    ///
    /// Each node is declared as `NODE<id> [label="<item> (<priority>)"]`.
    /// Unmarked nodes are drawn as boxes, marked nodes with the default shape.
    /// Each parent-child relation is one `NODE<parent> -> NODE<child>;` line.
    /// Ids are assigned in pre-order starting at 0.
    ///
    /// ```rust
    /// use rust_ordered_containers::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::new();
    /// heap.insert("a", 1);
    /// assert_eq!(
    ///     heap.to_dot(),
    ///     "digraph fibonacci_heap {\n  NODE0 [label=\"a (1)\",shape=box];\n}\n"
    /// );
    /// ```
    pub fn to_dot(&self) -> String {
        enum Step {
            Enter(NodeKey, usize),
            Edge(NodeKey, NodeKey, usize),
        }

        let mut out = String::from("digraph fibonacci_heap {\n");
        let mut ids: SecondaryMap<NodeKey, usize> = SecondaryMap::new();
        let mut stack: Vec<Step> = Vec::new();

        if let Some(min) = self.min {
            for root in storage::members(&self.nodes, min).into_iter().rev() {
                stack.push(Step::Enter(root, 1));
            }
        }

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(key, level) => {
                    let id = ids.len();
                    ids.insert(key, id);
                    let node = &self.nodes[key];
                    let label = escape_label(&format!("{} ({})", node.item, node.priority));
                    let shape = if node.marked { "" } else { ",shape=box" };
                    let _ = writeln!(
                        out,
                        "{:indent$}NODE{} [label=\"{}\"{}];",
                        "",
                        id,
                        label,
                        shape,
                        indent = level * 2
                    );
                    if let Some(child) = node.child {
                        for c in storage::members(&self.nodes, child).into_iter().rev() {
                            stack.push(Step::Edge(key, c, level));
                            stack.push(Step::Enter(c, level + 1));
                        }
                    }
                }
                Step::Edge(parent, child, level) => {
                    let _ = writeln!(
                        out,
                        "{:indent$}NODE{} -> NODE{};",
                        "",
                        ids[parent],
                        ids[child],
                        indent = level * 2
                    );
                }
            }
        }

        out.push_str("}\n");
        out
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Slots for the consolidation table: `2·log2(n) + 1`
fn degree_table_size(len: usize) -> usize {
    let log2 = (usize::BITS - len.leading_zeros()) as usize;
    2 * log2 + 1
}

impl<T: fmt::Debug, P: fmt::Debug, C: Comparator<P>> fmt::Debug for FibonacciHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len())
            .field("min", &self.find_min())
            .finish()
    }
}

/// Pre-order iterator over a [`FibonacciHeap`]
pub struct Iter<'a, T, P> {
    nodes: &'a Arena<Node<T, P>>,
    /// (next node to visit, first member of its ring)
    stack: SmallVec<[(NodeKey, NodeKey); 16]>,
    remaining: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = (&'a T, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let (current, first) = self.stack.pop()?;
        let node = &self.nodes[current];

        if node.right != first {
            self.stack.push((node.right, first));
        }
        if let Some(child) = node.child {
            self.stack.push((child, child));
        }

        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.item, &node.priority))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}

impl<'a, T, P, C: Comparator<P>> IntoIterator for &'a FibonacciHeap<T, P, C> {
    type Item = (&'a T, &'a P);
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
