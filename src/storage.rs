//! Arena node storage and circular linking
//!
//! Nodes of the linked containers live in a [`SlotMap`] and refer to each
//! other by [`NodeKey`] instead of by pointer. Keys are generational: once a
//! node is removed its key never resolves again, even if the slot is reused.
//! That is what makes heap handles safe to hold across removals.
//!
//! On top of the arena this module provides the circular doubly-linked list
//! ("ring") operations used by the Fibonacci heap's sibling lists and by the
//! deque:
//!
//! - A single node points to itself (both `left` and `right`)
//! - There is no head or tail; any member can be the entry point
//! - Splicing two rings together is O(1)
//!
//! # Example
//!
//! ```rust,ignore
//! let mut arena: Arena<Node> = Arena::with_key();
//! let a = arena.insert_with_key(Node::singleton);
//! let b = arena.insert_with_key(Node::singleton);
//! splice(&mut arena, a, b);
//! assert_eq!(arena[a].right(), b);
//! assert_eq!(arena[b].right(), a);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Generation-checked index of a node inside a container's arena
    pub struct NodeKey;
}

/// Slot arena owning every node of one container
pub(crate) type Arena<N> = SlotMap<NodeKey, N>;

/// Inline buffer for collecting the members of a ring
pub(crate) type RingMembers = SmallVec<[NodeKey; 16]>;

/// A node that can be a member of a ring
pub(crate) trait RingNode {
    fn left(&self) -> NodeKey;
    fn right(&self) -> NodeKey;
    fn set_left(&mut self, key: NodeKey);
    fn set_right(&mut self, key: NodeKey);
}

/// Makes `node` a ring of its own
#[inline]
pub(crate) fn make_singleton<N: RingNode>(arena: &mut Arena<N>, node: NodeKey) {
    let n = &mut arena[node];
    n.set_left(node);
    n.set_right(node);
}

/// Returns true if `node` is the only member of its ring
#[cfg(test)]
pub(crate) fn is_singleton<N: RingNode>(arena: &Arena<N>, node: NodeKey) -> bool {
    arena[node].right() == node
}

/// Concatenates the ring containing `b` onto the ring containing `a`
///
/// The members of `b`'s ring end up between `a.left` and `a`, i.e. when
/// walking right from `a` they come last. The rings must be distinct.
pub(crate) fn splice<N: RingNode>(arena: &mut Arena<N>, a: NodeKey, b: NodeKey) {
    let a_last = arena[a].left();
    let b_last = arena[b].left();

    arena[a_last].set_right(b);
    arena[b].set_left(a_last);
    arena[b_last].set_right(a);
    arena[a].set_left(b_last);
}

/// Removes `node` from its ring, leaving it as a singleton
///
/// Returns the former right neighbour, or `None` if `node` was alone.
pub(crate) fn unlink<N: RingNode>(arena: &mut Arena<N>, node: NodeKey) -> Option<NodeKey> {
    let left = arena[node].left();
    let right = arena[node].right();
    if right == node {
        return None;
    }

    arena[left].set_right(right);
    arena[right].set_left(left);
    make_singleton(arena, node);
    Some(right)
}

/// Collects every member of the ring, starting at `start` and walking right
pub(crate) fn members<N: RingNode>(arena: &Arena<N>, start: NodeKey) -> RingMembers {
    let mut out = RingMembers::new();
    let mut current = start;
    loop {
        out.push(current);
        current = arena[current].right();
        if current == start {
            break;
        }
    }
    out
}
