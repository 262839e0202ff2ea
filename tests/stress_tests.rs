//! Stress tests that push the containers with large seeded workloads
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_ordered_containers::{
    Bst, Deque, FibonacciHeap, OrderedMap, PriorityQueue, RbTreeMap, SplayTreeMap,
};
use std::collections::{BTreeMap, VecDeque};

/// Random inserts and removes checked against a BTreeMap
fn test_random_workload<M: OrderedMap<u32, u32> + Default>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = M::default();
    let mut model = BTreeMap::new();

    for step in 0..20_000u32 {
        let key = rng.gen_range(0..2_000);
        if rng.gen_bool(0.6) {
            assert_eq!(map.insert(key, step), model.insert(key, step));
        } else {
            assert_eq!(map.remove(&key), model.remove(&key));
        }
        if step % 1_000 == 0 {
            assert_eq!(map.check_invariants(), Ok(()));
        }
    }

    assert_eq!(map.len(), model.len());
    let expected: Vec<(&u32, &u32)> = model.iter().collect();
    assert_eq!(map.entries(), expected);
}

/// Ascending then descending bulk loads
fn test_sorted_bulk<M: OrderedMap<u32, u32> + Default>(n: u32) {
    let mut map = M::default();
    for i in 0..n {
        map.insert(i, i);
    }
    for i in (n..2 * n).rev() {
        map.insert(i, i);
    }
    assert_eq!(map.len(), 2 * n as usize);
    assert_eq!(map.min_key(), Some(&0));
    assert_eq!(map.max_key(), Some(&(2 * n - 1)));
    for i in 0..2 * n {
        assert_eq!(map.get(&i), Some(&i));
    }
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn test_rb_tree_random_workload() {
    test_random_workload::<RbTreeMap<u32, u32>>(0x5eed);
}

#[test]
fn test_splay_tree_random_workload() {
    test_random_workload::<SplayTreeMap<u32, u32>>(0x5eed);
}

#[test]
fn test_bst_random_workload() {
    test_random_workload::<Bst<u32, u32>>(0x5eed);
}

#[test]
fn test_rb_tree_sorted_bulk() {
    test_sorted_bulk::<RbTreeMap<u32, u32>>(5_000);
}

#[test]
fn test_splay_tree_sorted_bulk() {
    test_sorted_bulk::<SplayTreeMap<u32, u32>>(5_000);
}

#[test]
fn test_rb_tree_height_stays_logarithmic() {
    let mut map = RbTreeMap::new();
    for i in 0..100_000u32 {
        map.insert(i, ());
    }
    // A red-black tree with n nodes has height at most 2 log2(n + 1)
    assert!(map.height() <= 34, "height {}", map.height());
    while map.len() > 1_000 {
        map.remove_min();
    }
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn test_fibonacci_massive_operations() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();

    for i in 0..10_000u32 {
        handles.push(heap.insert(i, rng.gen_range(0..1_000_000i64)));
    }
    heap.delete_min();

    // Decrease a random half of the keys
    for handle in handles.iter().step_by(2) {
        if let Some(&p) = heap.priority(*handle) {
            let lower = p - rng.gen_range(0..1_000_000i64);
            assert!(heap.decrease_priority(*handle, lower).is_ok());
        }
    }
    assert_eq!(heap.check_invariants(), Ok(()));

    let mut last = i64::MIN;
    let mut popped = 0;
    while let Some((_, p)) = heap.delete_min() {
        assert!(p >= last);
        last = p;
        popped += 1;
    }
    assert_eq!(popped, 9_999);
}

#[test]
fn test_priority_queue_dijkstra_like_workload() {
    // Relax edges on a grid graph; every settled distance must be final
    const SIDE: usize = 60;
    let mut rng = StdRng::seed_from_u64(42);
    let weights: Vec<u32> = (0..SIDE * SIDE).map(|_| rng.gen_range(1..10)).collect();

    let mut queue = PriorityQueue::new();
    let mut settled = vec![false; SIDE * SIDE];
    let mut dist = vec![u32::MAX; SIDE * SIDE];
    dist[0] = 0;
    queue.push(0usize, 0u32);

    let mut last = 0;
    while let Some((node, d)) = queue.delete_min() {
        assert!(d >= last);
        last = d;
        settled[node] = true;
        let (r, c) = (node / SIDE, node % SIDE);
        let mut neighbours = Vec::new();
        if r > 0 {
            neighbours.push(node - SIDE);
        }
        if r + 1 < SIDE {
            neighbours.push(node + SIDE);
        }
        if c > 0 {
            neighbours.push(node - 1);
        }
        if c + 1 < SIDE {
            neighbours.push(node + 1);
        }
        for next in neighbours {
            let candidate = d + weights[next];
            if !settled[next] && candidate < dist[next] {
                dist[next] = candidate;
                queue.change_priority(next, candidate);
            }
        }
    }

    assert!(settled.iter().all(|&s| s));
    assert!(queue.is_empty());
}

#[test]
fn test_deque_random_workload() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut deque = Deque::new();
    let mut model = VecDeque::new();
    for i in 0..50_000 {
        match rng.gen_range(0..4) {
            0 => {
                deque.push_front(i);
                model.push_front(i);
            }
            1 => {
                deque.push_back(i);
                model.push_back(i);
            }
            2 => assert_eq!(deque.pop_front(), model.pop_front()),
            _ => assert_eq!(deque.pop_back(), model.pop_back()),
        }
    }
    assert_eq!(deque.len(), model.len());
    assert!(deque.into_iter().eq(model.into_iter()));
}
