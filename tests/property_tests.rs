//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, replay them against a
//! container and a model from `std::collections`, and verify that the
//! results agree and the structural invariants hold after every step.

use proptest::prelude::*;
use rust_ordered_containers::{
    Bst, Deque, FibonacciHeap, OrderedMap, PriorityQueue, RbTreeMap, SplayTreeMap,
};

use std::collections::{BTreeMap, HashMap, VecDeque};

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i32, i32),
    Remove(i32),
    Get(i32),
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        3 => (-50i32..50, any::<i32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (-50i32..50).prop_map(MapOp::Remove),
        1 => (-50i32..50).prop_map(MapOp::Get),
    ]
}

/// Replays `ops` against a map and a `BTreeMap` model
fn test_map_matches_model<M: OrderedMap<i32, i32> + Default>(
    ops: Vec<MapOp>,
) -> Result<(), TestCaseError> {
    let mut map = M::default();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            MapOp::Insert(k, v) => prop_assert_eq!(map.insert(k, v), model.insert(k, v)),
            MapOp::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(&k)),
            MapOp::Get(k) => prop_assert_eq!(map.get(&k), model.get(&k)),
        }
        prop_assert_eq!(map.len(), model.len());
        if let Err(msg) = map.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
    }

    let expected: Vec<(&i32, &i32)> = model.iter().collect();
    prop_assert_eq!(map.entries(), expected);
    prop_assert_eq!(map.min_key().copied(), model.keys().next().copied());
    prop_assert_eq!(map.max_key().copied(), model.keys().next_back().copied());
    Ok(())
}

#[derive(Debug, Clone)]
enum ExtremeOp {
    Insert(i32),
    Remove(i32),
    RemoveMin,
    RemoveMax,
}

fn extreme_op() -> impl Strategy<Value = ExtremeOp> {
    prop_oneof![
        4 => (-100i32..100).prop_map(ExtremeOp::Insert),
        2 => (-100i32..100).prop_map(ExtremeOp::Remove),
        1 => Just(ExtremeOp::RemoveMin),
        1 => Just(ExtremeOp::RemoveMax),
    ]
}

/// Mixes keyed and extreme removals on the red-black tree
fn test_rb_tree_extremes_match_model(ops: Vec<ExtremeOp>) -> Result<(), TestCaseError> {
    let mut map = RbTreeMap::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            ExtremeOp::Insert(k) => prop_assert_eq!(map.insert(k, k), model.insert(k, k)),
            ExtremeOp::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(&k)),
            ExtremeOp::RemoveMin => {
                let expected = model.keys().next().copied();
                if let Some(k) = expected {
                    model.remove(&k);
                }
                prop_assert_eq!(map.remove_min().map(|(k, _)| k), expected);
            }
            ExtremeOp::RemoveMax => {
                let expected = model.keys().next_back().copied();
                if let Some(k) = expected {
                    model.remove(&k);
                }
                prop_assert_eq!(map.remove_max().map(|(k, _)| k), expected);
            }
        }
        prop_assert_eq!(map.len(), model.len());
        if let Err(msg) = map.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
    }

    prop_assert!(map.keys().eq(model.keys()));
    Ok(())
}

/// Insert then get returns the inserted value for every key
fn test_round_trip<M: OrderedMap<i32, i32> + Default>(
    pairs: Vec<(i32, i32)>,
) -> Result<(), TestCaseError> {
    let mut map = M::default();
    for (k, v) in pairs {
        map.insert(k, v);
        prop_assert_eq!(map.get(&k), Some(&v));
    }
    Ok(())
}

/// Removing a present key shrinks the map by one; removing it again is a no-op
fn test_delete_idempotent<M: OrderedMap<i32, i32> + Default>(
    keys: Vec<i32>,
    victim: i32,
) -> Result<(), TestCaseError> {
    let mut map = M::default();
    for k in &keys {
        map.insert(*k, *k);
    }
    let before = map.len();
    let present = keys.contains(&victim);

    let first = map.remove(&victim);
    prop_assert_eq!(first.is_some(), present);
    prop_assert_eq!(map.len(), before - usize::from(present));

    prop_assert_eq!(map.remove(&victim), None);
    prop_assert_eq!(map.remove(&victim), None);
    prop_assert_eq!(map.len(), before - usize::from(present));
    Ok(())
}

/// Interleaved insert / decrease / delete_min yields non-decreasing minimums
fn test_heap_delete_min_order(
    initial: Vec<i32>,
    ops: Vec<(u8, usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    let mut live: HashMap<usize, i32> = HashMap::new();

    for (i, p) in initial.iter().enumerate() {
        handles.push(heap.insert(i, *p));
        live.insert(i, *p);
    }

    let mut last_popped: Option<i32> = None;
    for (kind, idx, priority) in ops {
        match kind % 3 {
            0 => {
                let id = handles.len();
                handles.push(heap.insert(id, priority));
                live.insert(id, priority);
                // A fresh insert may undercut what was already popped
                last_popped = None;
            }
            1 if !handles.is_empty() => {
                let idx = idx % handles.len();
                if let Some(&old) = live.get(&idx) {
                    let lower = old.min(priority);
                    prop_assert!(heap.decrease_priority(handles[idx], lower).is_ok());
                    live.insert(idx, lower);
                    if lower < last_popped.unwrap_or(i32::MIN) {
                        last_popped = None;
                    }
                } else {
                    prop_assert!(heap.decrease_priority(handles[idx], priority).is_err());
                }
            }
            _ => {
                let popped = heap.delete_min();
                let expected = live.values().min().copied();
                prop_assert_eq!(popped.map(|(_, p)| p), expected);
                if let Some((id, p)) = popped {
                    prop_assert_eq!(live.remove(&id), Some(p));
                    if let Some(prev) = last_popped {
                        prop_assert!(prev <= p);
                    }
                    last_popped = Some(p);
                }
            }
        }

        prop_assert_eq!(heap.len(), live.len());
        prop_assert_eq!(heap.find_min().map(|(_, p)| *p), live.values().min().copied());
        if let Err(msg) = heap.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
    }
    Ok(())
}

/// Arbitrary priority changes and deletes keep the minimum exact
fn test_heap_change_and_delete(
    initial: Vec<i32>,
    ops: Vec<(bool, usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    let mut live: HashMap<usize, i32> = HashMap::new();
    for (i, p) in initial.iter().enumerate() {
        handles.push(heap.insert(i, *p));
        live.insert(i, *p);
    }
    // Consolidate once so changes hit real trees
    if let Some((id, _)) = heap.delete_min() {
        live.remove(&id);
    }

    for (delete, idx, priority) in ops {
        let idx = idx % handles.len();
        if delete {
            let result = heap.delete(handles[idx]);
            match live.remove(&idx) {
                Some(p) => prop_assert_eq!(result.ok(), Some((idx, p))),
                None => prop_assert!(result.is_err()),
            }
        } else if live.contains_key(&idx) {
            prop_assert!(heap.change_priority(handles[idx], priority).is_ok());
            live.insert(idx, priority);
            prop_assert_eq!(heap.priority(handles[idx]), Some(&priority));
        }
        prop_assert_eq!(heap.find_min().map(|(_, p)| *p), live.values().min().copied());
        if let Err(msg) = heap.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
    }

    let mut drained = Vec::new();
    while let Some((_, p)) = heap.delete_min() {
        drained.push(p);
    }
    let mut expected: Vec<i32> = live.values().copied().collect();
    expected.sort_unstable();
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// The keyed queue agrees with a `HashMap` of key to priority
fn test_priority_queue_matches_model(ops: Vec<(u8, u8, i32)>) -> Result<(), TestCaseError> {
    let mut queue = PriorityQueue::new();
    let mut model: HashMap<u8, i32> = HashMap::new();

    for (kind, key, priority) in ops {
        match kind % 4 {
            0 => {
                queue.push(key, priority);
                model.insert(key, priority);
            }
            1 => {
                queue.change_priority(key, priority);
                model.insert(key, priority);
            }
            2 => {
                let removed = queue.delete(&key);
                prop_assert_eq!(removed, model.remove(&key).map(|p| (key, p)));
            }
            _ => {
                let expected = model.values().min().copied();
                let popped = queue.delete_min();
                prop_assert_eq!(popped.map(|(_, p)| p), expected);
                if let Some((k, p)) = popped {
                    prop_assert_eq!(model.remove(&k), Some(p));
                }
            }
        }
        prop_assert_eq!(queue.len(), model.len());
        prop_assert_eq!(queue.min_priority().copied(), model.values().min().copied());
        for (k, p) in &model {
            prop_assert_eq!(queue.priority(k), Some(p));
        }
    }
    Ok(())
}

/// The deque agrees with `VecDeque`
fn test_deque_matches_model(ops: Vec<(u8, i32)>) -> Result<(), TestCaseError> {
    let mut deque = Deque::new();
    let mut model = VecDeque::new();

    for (kind, value) in ops {
        match kind % 4 {
            0 => {
                deque.push_front(value);
                model.push_front(value);
            }
            1 => {
                deque.push_back(value);
                model.push_back(value);
            }
            2 => prop_assert_eq!(deque.pop_front(), model.pop_front()),
            _ => prop_assert_eq!(deque.pop_back(), model.pop_back()),
        }
        prop_assert_eq!(deque.len(), model.len());
        prop_assert_eq!(deque.front(), model.front());
        prop_assert_eq!(deque.back(), model.back());
    }

    prop_assert!(deque.iter().eq(model.iter()));
    prop_assert!(deque.iter().rev().eq(model.iter().rev()));
    Ok(())
}

proptest! {
    #[test]
    fn test_rb_tree_matches_model(ops in prop::collection::vec(map_op(), 0..200)) {
        test_map_matches_model::<RbTreeMap<i32, i32>>(ops)?;
    }

    #[test]
    fn test_rb_tree_extremes(ops in prop::collection::vec(extreme_op(), 0..400)) {
        test_rb_tree_extremes_match_model(ops)?;
    }

    #[test]
    fn test_rb_tree_round_trip(pairs in prop::collection::vec((any::<i32>(), any::<i32>()), 0..100)) {
        test_round_trip::<RbTreeMap<i32, i32>>(pairs)?;
    }

    #[test]
    fn test_rb_tree_delete_idempotent(keys in prop::collection::vec(-20i32..20, 0..40), victim in -20i32..20) {
        test_delete_idempotent::<RbTreeMap<i32, i32>>(keys, victim)?;
    }

    #[test]
    fn test_splay_tree_matches_model(ops in prop::collection::vec(map_op(), 0..200)) {
        test_map_matches_model::<SplayTreeMap<i32, i32>>(ops)?;
    }

    #[test]
    fn test_splay_tree_round_trip(pairs in prop::collection::vec((any::<i32>(), any::<i32>()), 0..100)) {
        test_round_trip::<SplayTreeMap<i32, i32>>(pairs)?;
    }

    #[test]
    fn test_splay_tree_delete_idempotent(keys in prop::collection::vec(-20i32..20, 0..40), victim in -20i32..20) {
        test_delete_idempotent::<SplayTreeMap<i32, i32>>(keys, victim)?;
    }

    #[test]
    fn test_bst_matches_model(ops in prop::collection::vec(map_op(), 0..200)) {
        test_map_matches_model::<Bst<i32, i32>>(ops)?;
    }

    #[test]
    fn test_bst_round_trip(pairs in prop::collection::vec((any::<i32>(), any::<i32>()), 0..100)) {
        test_round_trip::<Bst<i32, i32>>(pairs)?;
    }

    #[test]
    fn test_bst_delete_idempotent(keys in prop::collection::vec(-20i32..20, 0..40), victim in -20i32..20) {
        test_delete_idempotent::<Bst<i32, i32>>(keys, victim)?;
    }

    #[test]
    fn test_fibonacci_delete_min_order(
        initial in prop::collection::vec(-100i32..100, 0..50),
        ops in prop::collection::vec((any::<u8>(), 0usize..100, -100i32..100), 0..150)
    ) {
        test_heap_delete_min_order(initial, ops)?;
    }

    #[test]
    fn test_fibonacci_change_and_delete(
        initial in prop::collection::vec(-100i32..100, 2..60),
        ops in prop::collection::vec((any::<bool>(), 0usize..100, -100i32..100), 0..100)
    ) {
        test_heap_change_and_delete(initial, ops)?;
    }

    #[test]
    fn test_priority_queue_model(ops in prop::collection::vec((any::<u8>(), 0u8..16, -100i32..100), 0..200)) {
        test_priority_queue_matches_model(ops)?;
    }

    #[test]
    fn test_deque_model(ops in prop::collection::vec((any::<u8>(), any::<i32>()), 0..200)) {
        test_deque_matches_model(ops)?;
    }
}
