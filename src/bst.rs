//! Unbalanced binary search tree
//!
//! A plain BST with no rebalancing. It is the baseline the balanced and
//! self-adjusting maps are measured against. Sorted input degenerates it
//! into a list, so every traversal here, including drop, is iterative.

use crate::compare::{Comparator, Natural};
use crate::traits::OrderedMap;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

/// Detaches the smallest node of the subtree in `link`
fn take_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref()?.left.is_some() {
        match link {
            Some(node) => link = &mut node.left,
            None => return None,
        }
    }
    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Detaches the largest node of the subtree in `link`
fn take_max<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref()?.right.is_some() {
        match link {
            Some(node) => link = &mut node.right,
            None => return None,
        }
    }
    let mut max = link.take()?;
    *link = max.left.take();
    Some(max)
}

fn free<K, V>(root: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Unbalanced binary search tree map
pub struct Bst<K, V, C = Natural> {
    root: Link<K, V>,
    len: usize,
    cmp: C,
}

impl<K: Ord, V> Bst<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord, V> Default for Bst<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> Bst<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Bst {
            root: None,
            len: 0,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        free(self.root.take());
        self.len = 0;
    }

    /// Inserts `value` under `key`, returning the previous value of an equal key
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let cmp = &self.cmp;
        let mut node = match self.root.as_mut() {
            Some(node) => node,
            None => {
                self.root = Some(Box::new(Node {
                    key,
                    value,
                    left: None,
                    right: None,
                }));
                self.len = 1;
                return None;
            }
        };
        loop {
            let next = match cmp.compare(&key, &node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            };
            match next {
                Some(child) => node = child,
                None => {
                    *next = Some(Box::new(Node {
                        key,
                        value,
                        left: None,
                        right: None,
                    }));
                    self.len += 1;
                    return None;
                }
            }
        }
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

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

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

    /// Removes `key` and returns its value
    ///
    /// A node with two children is replaced by its in-order successor.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let cmp = &self.cmp;
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_ref() {
                Some(node) => cmp.compare(key, &node.key),
                None => return None,
            };
            match (ordering, link) {
                (Ordering::Equal, found) => {
                    link = found;
                    break;
                }
                (Ordering::Less, Some(node)) => link = &mut node.left,
                (Ordering::Greater, Some(node)) => link = &mut node.right,
                (_, None) => return None,
            }
        }

        let mut target = link.take()?;
        *link = match (target.left.take(), target.right.take()) {
            (left, None) => left,
            (None, right) => right,
            (Some(left), mut right) => {
                let mut successor = take_min(&mut right)?;
                successor.left = Some(left);
                successor.right = right;
                Some(successor)
            }
        };
        self.len -= 1;
        Some(target.value)
    }

    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let node = take_min(&mut self.root)?;
        self.len -= 1;
        Some((node.key, node.value))
    }

    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let node = take_max(&mut self.root)?;
        self.len -= 1;
        Some((node.key, node.value))
    }

    pub fn min_key(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    pub fn max_key(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// Returns the number of levels (0 for an empty tree)
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|r| (r, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|c| (c, depth + 1)));
            stack.extend(node.right.as_deref().map(|c| (c, depth + 1)));
        }
        deepest
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Verifies key ordering and the cached length
    pub fn check_invariants(&self) -> Result<(), String> {
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
        if count != self.len {
            return Err(format!("len is {} but {} nodes reachable", self.len, count));
        }
        Ok(())
    }
}

enum CloneStep<'a, K, V> {
    Visit(Option<&'a Node<K, V>>),
    Build(&'a Node<K, V>),
}

/// Copies a subtree bottom-up without recursing, so degenerate chains are fine
fn clone_link<K: Clone, V: Clone>(root: &Link<K, V>) -> Link<K, V> {
    let mut built: Vec<Link<K, V>> = Vec::new();
    let mut steps = vec![CloneStep::Visit(root.as_deref())];

    while let Some(step) = steps.pop() {
        match step {
            CloneStep::Visit(None) => built.push(None),
            CloneStep::Visit(Some(node)) => {
                steps.push(CloneStep::Build(node));
                steps.push(CloneStep::Visit(node.right.as_deref()));
                steps.push(CloneStep::Visit(node.left.as_deref()));
            }
            CloneStep::Build(node) => {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    left,
                    right,
                })));
            }
        }
    }
    built.pop().flatten()
}

impl<K: Clone, V: Clone, C: Clone> Clone for Bst<K, V, C> {
    fn clone(&self) -> Self {
        Bst {
            root: clone_link(&self.root),
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }
}

impl<K, V, C> Drop for Bst<K, V, C> {
    fn drop(&mut self) {
        free(self.root.take());
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for Bst<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for Bst<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Bst<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a Bst<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V> for Bst<K, V, C> {
    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        Bst::height(self)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Bst::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Bst::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Bst::remove(self, key)
    }

    fn min_key(&mut self) -> Option<&K> {
        Bst::min_key(self)
    }

    fn max_key(&mut self) -> Option<&K> {
        Bst::max_key(self)
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn check_invariants(&self) -> Result<(), String> {
        Bst::check_invariants(self)
    }
}

/// In-order iterator over a [`Bst`]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
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
