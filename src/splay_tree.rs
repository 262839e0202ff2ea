//! Splay tree map
//!
//! A self-adjusting binary search tree: every access splays the touched key
//! to the root, so recently used keys are cheap to reach again. Splaying is
//! top-down (Sleator's "top-down-size-splay") and keeps a subtree size in
//! every node, which makes `len` O(1) and rank queries O(depth).
//!
//! Nodes live in a [`slotmap`] arena and link to each other by key, so the
//! tree can be arbitrarily deep without any recursive teardown.
//!
//! # Time Complexity
//!
//! | Operation     | Amortized  |
//! |---------------|------------|
//! | `insert`      | O(log n)   |
//! | `get`         | O(log n)   |
//! | `remove`      | O(log n)   |
//! | `min/max`     | O(log n)   |
//! | `get_by_rank` | O(depth)   |
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::SplayTreeMap;
//!
//! let mut map = SplayTreeMap::new();
//! map.insert("MA", "Massachusetts");
//! map.insert("GA", "Georgia");
//! assert_eq!(map.get(&"MA"), Some(&"Massachusetts"));
//! assert_eq!(map.min_key(), Some(&"GA"));
//! assert_eq!(map.get_by_rank(1), Some((&"MA", &"Massachusetts")));
//! ```

use crate::compare::{Comparator, Natural};
use crate::storage::{Arena, NodeKey};
use crate::traits::OrderedMap;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    size: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            size: 1,
        }
    }
}

#[inline]
fn size<K, V>(nodes: &Arena<Node<K, V>>, link: Option<NodeKey>) -> usize {
    link.map_or(0, |key| nodes[key].size)
}

/// Splays the subtree rooted at `n` and returns its new root
///
/// `probe` compares the sought key against a node's key. The new root is the
/// node holding the sought key, or the last node visited on the search path
/// if the key is absent.
fn splay<K, V, F>(nodes: &mut Arena<Node<K, V>>, mut n: NodeKey, mut probe: F) -> NodeKey
where
    F: FnMut(&K) -> Ordering,
{
    // Left tree collects nodes smaller than the key, right tree larger ones.
    // `*_last` is the node whose inner link receives the next attachment.
    let mut left_root: Option<NodeKey> = None;
    let mut left_last: Option<NodeKey> = None;
    let mut right_root: Option<NodeKey> = None;
    let mut right_last: Option<NodeKey> = None;
    let mut l_size = 0;
    let mut r_size = 0;

    loop {
        match probe(&nodes[n].key) {
            Ordering::Less => {
                let mut child = match nodes[n].left {
                    Some(child) => child,
                    None => break,
                };
                if probe(&nodes[child].key) == Ordering::Less {
                    // Rotate right
                    nodes[n].left = nodes[child].right;
                    nodes[child].right = Some(n);
                    nodes[n].size = 1 + size(nodes, nodes[n].left) + size(nodes, nodes[n].right);
                    n = child;
                    child = match nodes[n].left {
                        Some(child) => child,
                        None => break,
                    };
                }
                // Link right
                match right_last {
                    Some(last) => nodes[last].left = Some(n),
                    None => right_root = Some(n),
                }
                right_last = Some(n);
                r_size += 1 + size(nodes, nodes[n].right);
                n = child;
            }
            Ordering::Greater => {
                let mut child = match nodes[n].right {
                    Some(child) => child,
                    None => break,
                };
                if probe(&nodes[child].key) == Ordering::Greater {
                    // Rotate left
                    nodes[n].right = nodes[child].left;
                    nodes[child].left = Some(n);
                    nodes[n].size = 1 + size(nodes, nodes[n].left) + size(nodes, nodes[n].right);
                    n = child;
                    child = match nodes[n].right {
                        Some(child) => child,
                        None => break,
                    };
                }
                // Link left
                match left_last {
                    Some(last) => nodes[last].right = Some(n),
                    None => left_root = Some(n),
                }
                left_last = Some(n);
                l_size += 1 + size(nodes, nodes[n].left);
                n = child;
            }
            Ordering::Equal => break,
        }
    }

    l_size += size(nodes, nodes[n].left);
    r_size += size(nodes, nodes[n].right);
    nodes[n].size = l_size + r_size + 1;

    if let Some(last) = left_last {
        nodes[last].right = None;
    }
    if let Some(last) = right_last {
        nodes[last].left = None;
    }

    // The spines were linked before their final sizes were known
    let mut y = left_root;
    while let Some(k) = y {
        nodes[k].size = l_size;
        l_size -= 1 + size(nodes, nodes[k].left);
        y = nodes[k].right;
    }
    let mut y = right_root;
    while let Some(k) = y {
        nodes[k].size = r_size;
        r_size -= 1 + size(nodes, nodes[k].right);
        y = nodes[k].left;
    }

    // Reassemble
    match left_last {
        Some(last) => nodes[last].right = nodes[n].left,
        None => left_root = nodes[n].left,
    }
    match right_last {
        Some(last) => nodes[last].left = nodes[n].right,
        None => right_root = nodes[n].right,
    }
    nodes[n].left = left_root;
    nodes[n].right = right_root;
    n
}

/// Self-adjusting ordered map
#[derive(Clone)]
pub struct SplayTreeMap<K, V, C = Natural> {
    nodes: Arena<Node<K, V>>,
    root: Option<NodeKey>,
    cmp: C,
}

impl<K: Ord, V> SplayTreeMap<K, V> {
    /// Creates an empty map ordered by `K`'s natural order
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        SplayTreeMap {
            nodes: Arena::with_capacity_and_key(capacity),
            root: None,
            cmp: Natural,
        }
    }
}

impl<K: Ord, V> Default for SplayTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SplayTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        SplayTreeMap {
            nodes: Arena::with_key(),
            root: None,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Splays `key` (or its nearest neighbour) to the root
    ///
    /// Returns the root if it holds `key`.
    fn splay_key(&mut self, key: &K) -> Option<NodeKey> {
        let root = self.root?;
        let cmp = &self.cmp;
        let root = splay(&mut self.nodes, root, |k| cmp.compare(key, k));
        self.root = Some(root);
        if cmp.compare(key, &self.nodes[root].key) == Ordering::Equal {
            Some(root)
        } else {
            None
        }
    }

    /// Inserts `value` under `key`, returning the previous value of an equal key
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let root = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(self.nodes.insert(Node::new(key, value)));
                return None;
            }
        };
        let cmp = &self.cmp;
        let root = splay(&mut self.nodes, root, |k| cmp.compare(&key, k));

        let ordering = cmp.compare(&key, &self.nodes[root].key);
        if ordering == Ordering::Equal {
            self.root = Some(root);
            return Some(mem::replace(&mut self.nodes[root].value, value));
        }

        let mut node = Node::new(key, value);
        if ordering == Ordering::Less {
            node.left = self.nodes[root].left.take();
            node.right = Some(root);
            self.nodes[root].size = 1 + size(&self.nodes, self.nodes[root].right);
        } else {
            node.right = self.nodes[root].right.take();
            node.left = Some(root);
            self.nodes[root].size = 1 + size(&self.nodes, self.nodes[root].left);
        }
        node.size = 1 + size(&self.nodes, node.left) + size(&self.nodes, node.right);
        self.root = Some(self.nodes.insert(node));
        None
    }

    /// Looks up `key`, splaying it to the root
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let found = self.splay_key(key)?;
        Some(&self.nodes[found].value)
    }

    /// Looks up `key` mutably, splaying it to the root
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let found = self.splay_key(key)?;
        Some(&mut self.nodes[found].value)
    }

    pub fn contains_key(&mut self, key: &K) -> bool {
        self.splay_key(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` if it is absent
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let found = self.splay_key(key)?;
        let total = self.nodes[found].size;
        let node = self.nodes.remove(found)?;

        let new_root = match node.left {
            None => node.right,
            Some(left) => {
                // Every key on the left is smaller, so the splay lifts the
                // left subtree's maximum, which has no right child
                let cmp = &self.cmp;
                let x = splay(&mut self.nodes, left, |k| cmp.compare(key, k));
                self.nodes[x].right = node.right;
                Some(x)
            }
        };
        if let Some(x) = new_root {
            self.nodes[x].size = total - 1;
        }
        self.root = new_root;
        Some(node.value)
    }

    /// Splays the smallest key to the root and returns its entry
    pub fn min(&mut self) -> Option<(&K, &V)> {
        let root = splay(&mut self.nodes, self.root?, |_| Ordering::Less);
        self.root = Some(root);
        let node = &self.nodes[root];
        Some((&node.key, &node.value))
    }

    /// Splays the largest key to the root and returns its entry
    pub fn max(&mut self) -> Option<(&K, &V)> {
        let root = splay(&mut self.nodes, self.root?, |_| Ordering::Greater);
        self.root = Some(root);
        let node = &self.nodes[root];
        Some((&node.key, &node.value))
    }

    pub fn min_key(&mut self) -> Option<&K> {
        self.min().map(|(key, _)| key)
    }

    pub fn max_key(&mut self) -> Option<&K> {
        self.max().map(|(key, _)| key)
    }

    /// Returns the `rank`-th smallest entry (0-based) without restructuring
    pub fn get_by_rank(&self, mut rank: usize) -> Option<(&K, &V)> {
        let mut current = self.root;
        while let Some(k) = current {
            let node = &self.nodes[k];
            let left = size(&self.nodes, node.left);
            match rank.cmp(&left) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    rank -= left + 1;
                    current = node.right;
                }
            }
        }
        None
    }

    /// Returns the number of levels (0 for an empty map)
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeKey, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((k, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[k];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// In-order iterator over `(&K, &V)`
    ///
    /// Iteration does not splay.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Verifies ordering, subtree sizes and reachability
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut reachable = 0;
        let mut stack: Vec<NodeKey> = self.root.into_iter().collect();
        while let Some(k) = stack.pop() {
            let node = match self.nodes.get(k) {
                Some(node) => node,
                None => return Err("link to a removed node".to_string()),
            };
            reachable += 1;
            let expected = 1 + size(&self.nodes, node.left) + size(&self.nodes, node.right);
            if node.size != expected {
                return Err(format!("node size {} but children give {}", node.size, expected));
            }
            stack.extend(node.left);
            stack.extend(node.right);
        }
        if reachable != self.nodes.len() {
            return Err(format!(
                "{} nodes reachable but arena holds {}",
                reachable,
                self.nodes.len()
            ));
        }

        let mut previous: Option<&K> = None;
        for (i, (key, _)) in self.iter().enumerate() {
            if let Some(prev) = previous {
                if !self.cmp.lt(prev, key) {
                    return Err(format!("keys out of order at position {}", i));
                }
            }
            previous = Some(key);
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for SplayTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for SplayTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a SplayTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V> for SplayTreeMap<K, V, C> {
    fn len(&self) -> usize {
        SplayTreeMap::len(self)
    }

    fn height(&self) -> usize {
        SplayTreeMap::height(self)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        SplayTreeMap::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        SplayTreeMap::get(self, key)
    }

    fn contains_key(&mut self, key: &K) -> bool {
        SplayTreeMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        SplayTreeMap::remove(self, key)
    }

    fn min_key(&mut self) -> Option<&K> {
        SplayTreeMap::min_key(self)
    }

    fn max_key(&mut self) -> Option<&K> {
        SplayTreeMap::max_key(self)
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn check_invariants(&self) -> Result<(), String> {
        SplayTreeMap::check_invariants(self)
    }
}

/// In-order iterator over a [`SplayTreeMap`]
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    stack: Vec<NodeKey>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut link: Option<NodeKey>) {
        while let Some(k) = link {
            self.stack.push(k);
            link = self.nodes[k].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.stack.pop()?;
        let nodes: &'a Arena<Node<K, V>> = self.nodes;
        let node = &nodes[k];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
