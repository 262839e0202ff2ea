//! Left-leaning red-black tree map
//!
//! An ordered map kept balanced with Sedgewick's left-leaning red-black
//! rules. Every node tracks the size and height of its subtree, so `len` and
//! `height` are O(1).
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `insert`         | O(log n)   |
//! | `get`            | O(log n)   |
//! | `remove`         | O(log n)   |
//! | `remove_min/max` | O(log n)   |
//! | `min/max`        | O(log n)   |
//! | `len/height`     | O(1)       |
//!
//! # Invariants
//!
//! - No red node has a red child
//! - Every path from the root to an absent child has the same number of
//!   black nodes
//! - Red links lean left
//! - The root is black
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::RbTreeMap;
//!
//! let mut map = RbTreeMap::new();
//! map.insert(5, "five");
//! map.insert(3, "three");
//! map.insert(8, "eight");
//! assert_eq!(map.remove(&3), Some("three"));
//! assert_eq!(map.get(&3), None);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 8]);
//! ```

use crate::compare::{Comparator, Natural};
use crate::traits::OrderedMap;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    color: Color,
    size: usize,
    height: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: 1,
            height: 1,
        })
    }

    /// Recomputes `size` and `height` from the children
    #[inline]
    fn update(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

#[inline]
fn is_red<K, V>(link: &Link<K, V>) -> bool {
    matches!(link, Some(node) if node.color == Color::Red)
}

#[inline]
fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

#[inline]
fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Returns true if the left child of `link` is red
#[inline]
fn left_is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().map_or(false, |node| is_red(&node.left))
}

fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match h.right.take() {
        Some(x) => x,
        None => return h,
    };
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    h.update();
    x.left = Some(h);
    x.update();
    x
}

fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match h.left.take() {
        Some(x) => x,
        None => return h,
    };
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    h.update();
    x.right = Some(h);
    x.update();
    x
}

fn flip_colors<K, V>(h: &mut Node<K, V>) {
    h.color = h.color.flipped();
    if let Some(left) = h.left.as_mut() {
        left.color = left.color.flipped();
    }
    if let Some(right) = h.right.as_mut() {
        right.color = right.color.flipped();
    }
}

/// Restores the left-leaning shape on the way back up
fn fixup<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && left_is_red(&h.left) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    h.update();
    h
}

/// Makes `h.left` or one of its children red before descending left
fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if left_is_red(&h.right) {
        h.right = h.right.take().map(rotate_right);
        h = rotate_left(h);
        flip_colors(&mut h);
    }
    h
}

/// Makes `h.right` or one of its children red before descending right
fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if left_is_red(&h.left) {
        h = rotate_right(h);
        flip_colors(&mut h);
    }
    h
}

fn delete_min<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if h.left.is_none() {
        let node = *h;
        return (node.right, (node.key, node.value));
    }
    if !is_red(&h.left) && !left_is_red(&h.left) {
        h = move_red_left(h);
    }
    match h.left.take() {
        Some(left) => {
            let (left, removed) = delete_min(left);
            h.left = left;
            (Some(fixup(h)), removed)
        }
        None => {
            let node = *h;
            (node.right, (node.key, node.value))
        }
    }
}

fn delete_max<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if is_red(&h.left) {
        h = rotate_right(h);
    }
    if h.right.is_none() {
        let node = *h;
        return (node.left, (node.key, node.value));
    }
    if !is_red(&h.right) && !left_is_red(&h.right) {
        h = move_red_right(h);
    }
    match h.right.take() {
        Some(right) => {
            let (right, removed) = delete_max(right);
            h.right = right;
            (Some(fixup(h)), removed)
        }
        None => {
            let node = *h;
            (node.left, (node.key, node.value))
        }
    }
}

/// Drops a subtree with an explicit stack instead of recursion
fn free<K, V>(root: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Left-leaning red-black tree map ordered by a [`Comparator`]
#[derive(Clone)]
pub struct RbTreeMap<K, V, C = Natural> {
    root: Link<K, V>,
    cmp: C,
}

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Creates an empty map ordered by `K`'s natural order
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord, V> Default for RbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> RbTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        RbTreeMap { root: None, cmp }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of levels (0 for an empty map)
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Inserts `value` under `key`
    ///
    /// If an equal key is already present its value is replaced and the old
    /// value returned. The stored key is kept.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut old = None;
        let root = Self::insert_node(&self.cmp, self.root.take(), key, value, &mut old);
        self.root = Some(root);
        self.blacken_root();
        old
    }

    fn insert_node(
        cmp: &C,
        link: Link<K, V>,
        key: K,
        value: V,
        old: &mut Option<V>,
    ) -> Box<Node<K, V>> {
        let mut h = match link {
            Some(h) => h,
            None => return Node::new(key, value),
        };
        match cmp.compare(&key, &h.key) {
            Ordering::Less => {
                h.left = Some(Self::insert_node(cmp, h.left.take(), key, value, old));
            }
            Ordering::Greater => {
                h.right = Some(Self::insert_node(cmp, h.right.take(), key, value, old));
            }
            Ordering::Equal => {
                *old = Some(mem::replace(&mut h.value, value));
            }
        }
        fixup(h)
    }

    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.cmp.compare(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let cmp = &self.cmp;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match cmp.compare(key, &node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` if it is absent
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let root = self.root.take()?;
        let (root, removed) = Self::delete_node(&self.cmp, root, key);
        self.root = root;
        self.blacken_root();
        removed
    }

    /// Removes `key` from the subtree rooted at `h`; `key` must be present
    fn delete_node(cmp: &C, mut h: Box<Node<K, V>>, key: &K) -> (Link<K, V>, Option<V>) {
        let removed;
        if cmp.lt(key, &h.key) {
            if !is_red(&h.left) && !left_is_red(&h.left) {
                h = move_red_left(h);
            }
            removed = match h.left.take() {
                Some(left) => {
                    let (left, removed) = Self::delete_node(cmp, left, key);
                    h.left = left;
                    removed
                }
                None => None,
            };
        } else {
            if is_red(&h.left) {
                h = rotate_right(h);
            }
            if cmp.compare(key, &h.key) == Ordering::Equal && h.right.is_none() {
                let node = *h;
                return (node.left, Some(node.value));
            }
            if !is_red(&h.right) && !left_is_red(&h.right) {
                h = move_red_right(h);
            }
            removed = match h.right.take() {
                Some(right) if cmp.compare(key, &h.key) == Ordering::Equal => {
                    // Replace with the successor, then drop the successor's node
                    let (right, (succ_key, succ_value)) = delete_min(right);
                    h.right = right;
                    h.key = succ_key;
                    Some(mem::replace(&mut h.value, succ_value))
                }
                Some(right) => {
                    let (right, removed) = Self::delete_node(cmp, right, key);
                    h.right = right;
                    removed
                }
                None => None,
            };
        }
        (Some(fixup(h)), removed)
    }

    /// Removes and returns the entry with the smallest key
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, removed) = delete_min(root);
        self.root = root;
        self.blacken_root();
        Some(removed)
    }

    /// Removes and returns the entry with the largest key
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, removed) = delete_max(root);
        self.root = root;
        self.blacken_root();
        Some(removed)
    }

    /// Returns the entry with the smallest key
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    pub fn min_key(&self) -> Option<&K> {
        self.min().map(|(key, _)| key)
    }

    pub fn max_key(&self) -> Option<&K> {
        self.max().map(|(key, _)| key)
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        free(self.root.take());
    }

    /// In-order iterator over `(&K, &V)`
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len())
    }

    /// In-order iterator over the keys
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// In-order iterator over the values
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    #[inline]
    fn blacken_root(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
    }

    /// Verifies the red-black, ordering and bookkeeping invariants
    ///
    /// Intended for tests; runs in O(n).
    pub fn check_invariants(&self) -> Result<(), String> {
        if is_red(&self.root) {
            return Err("root is red".to_string());
        }
        self.check_node(&self.root)?;

        let mut previous: Option<&K> = None;
        let mut count = 0;
        for (key, _) in self.iter() {
            if let Some(prev) = previous {
                if !self.cmp.lt(prev, key) {
                    return Err(format!("keys out of order at position {}", count));
                }
            }
            previous = Some(key);
            count += 1;
        }
        if count != self.len() {
            return Err(format!("len() is {} but {} entries reachable", self.len(), count));
        }
        Ok(())
    }

    /// Returns the black height of `link`
    fn check_node(&self, link: &Link<K, V>) -> Result<usize, String> {
        let node = match link {
            Some(node) => node,
            None => return Ok(1),
        };
        if node.color == Color::Red && (is_red(&node.left) || is_red(&node.right)) {
            return Err("red node has a red child".to_string());
        }
        if is_red(&node.right) {
            return Err("red link leans right".to_string());
        }
        let left = self.check_node(&node.left)?;
        let right = self.check_node(&node.right)?;
        if left != right {
            return Err(format!("black height mismatch: {} vs {}", left, right));
        }
        if node.size != 1 + size(&node.left) + size(&node.right) {
            return Err(format!("stale size {}", node.size));
        }
        if node.height != 1 + height(&node.left).max(height(&node.right)) {
            return Err(format!("stale height {}", node.height));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

impl<K, V, C> Drop for RbTreeMap<K, V, C> {
    fn drop(&mut self) {
        free(self.root.take());
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for RbTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RbTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a RbTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V> for RbTreeMap<K, V, C> {
    fn len(&self) -> usize {
        RbTreeMap::len(self)
    }

    fn height(&self) -> usize {
        RbTreeMap::height(self)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        RbTreeMap::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        RbTreeMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        RbTreeMap::remove(self, key)
    }

    fn min_key(&mut self) -> Option<&K> {
        RbTreeMap::min_key(self)
    }

    fn max_key(&mut self) -> Option<&K> {
        RbTreeMap::max_key(self)
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn check_invariants(&self) -> Result<(), String> {
        RbTreeMap::check_invariants(self)
    }
}

/// In-order iterator over an [`RbTreeMap`]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// In-order iterator over the keys of an [`RbTreeMap`]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// In-order iterator over the values of an [`RbTreeMap`]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
