//! Double-ended queue
//!
//! A deque built on a circular doubly-linked ring of arena nodes. The front
//! is `head` and the back is `head.left`, so both ends are reached in O(1)
//! without a separate tail pointer.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_containers::Deque;
//!
//! let mut deque: Deque<i32> = [1, 2].into_iter().collect();
//! deque.push_front(0);
//! deque.push_back(3);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
//! assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
//! assert_eq!(deque.pop_back(), Some(3));
//! assert_eq!(deque.pop_front(), Some(0));
//! ```

use crate::storage::{self, Arena, NodeKey, RingNode};
use std::fmt;
use std::iter::FusedIterator;

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: NodeKey,
    right: NodeKey,
}

impl<T> RingNode for Node<T> {
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

/// Double-ended queue with O(1) operations at both ends
#[derive(Clone)]
pub struct Deque<T> {
    nodes: Arena<Node<T>>,
    head: Option<NodeKey>,
}

impl<T> Deque<T> {
    pub fn new() -> Self {
        Deque {
            nodes: Arena::with_key(),
            head: None,
        }
    }

    /// Creates an empty deque with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Deque {
            nodes: Arena::with_capacity_and_key(capacity),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    fn new_node(&mut self, value: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            value,
            left: key,
            right: key,
        })
    }

    #[inline]
    fn tail(&self) -> Option<NodeKey> {
        self.head.map(|head| self.nodes[head].left)
    }

    pub fn push_front(&mut self, value: T) {
        let node = self.new_node(value);
        if let Some(head) = self.head {
            storage::splice(&mut self.nodes, head, node);
        }
        self.head = Some(node);
    }

    pub fn push_back(&mut self, value: T) {
        let node = self.new_node(value);
        match self.head {
            Some(head) => storage::splice(&mut self.nodes, head, node),
            None => self.head = Some(node),
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.head = storage::unlink(&mut self.nodes, head);
        self.nodes.remove(head).map(|node| node.value)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail()?;
        if storage::unlink(&mut self.nodes, tail).is_none() {
            self.head = None;
        }
        self.nodes.remove(tail).map(|node| node.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|head| &self.nodes[head].value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail().map(|tail| &self.nodes[tail].value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        Some(&mut self.nodes[head].value)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.tail()?;
        Some(&mut self.nodes[tail].value)
    }

    /// Front-to-back iterator; `.rev()` walks back-to-front
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail(),
            remaining: self.len(),
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing iterator over a [`Deque`]
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a Arena<Node<T>> = self.nodes;
        let node = &nodes[self.front?];
        self.front = Some(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a Arena<Node<T>> = self.nodes;
        let node = &nodes[self.back?];
        self.back = Some(node.left);
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`Deque`]
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
