//! Tests for the Fibonacci heap and the keyed priority queue
//!
//! These cover the documented scenarios, handle validity across removals,
//! comparator injection and the Graphviz export.

use rust_ordered_containers::{FibonacciHeap, HeapError, PriorityQueue};

#[test]
fn test_heap_documented_scenario() {
    let mut heap = FibonacciHeap::new();
    heap.insert("a", 10);
    heap.insert("b", 20);
    assert_eq!(heap.find_min(), Some((&"a", &10)));
    assert_eq!(heap.delete_min(), Some(("a", 10)));
    assert_eq!(heap.find_min(), Some((&"b", &20)));
    assert_eq!(heap.delete_min(), Some(("b", 20)));
    assert_eq!(heap.find_min(), None);
}

#[test]
fn test_queue_change_priority_scenario() {
    let mut queue = PriorityQueue::new();
    queue.push("car", 50);
    queue.push("train", 50);
    queue.push("bike", 10);
    assert_eq!(queue.min(), Some((&"bike", &10)));
    queue.change_priority("car", 0);
    assert_eq!(queue.min(), Some((&"car", &0)));
}

#[test]
fn test_handles_survive_unrelated_removals() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..100).map(|i| heap.insert(i, i * 10)).collect();

    for _ in 0..50 {
        heap.delete_min();
    }
    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(heap.contains(*handle), i >= 50);
    }
    assert_eq!(heap.decrease_priority(handles[99], -1), Ok(()));
    assert_eq!(heap.find_min(), Some((&99, &-1)));
    assert_eq!(
        heap.decrease_priority(handles[0], -5),
        Err(HeapError::InvalidHandle)
    );
    assert_eq!(heap.delete(handles[10]), Err(HeapError::InvalidHandle));
    assert_eq!(heap.delete(handles[60]), Ok((60, 600)));
    assert_eq!(heap.delete(handles[60]), Err(HeapError::InvalidHandle));
    assert_eq!(heap.len(), 49);
    assert_eq!(heap.check_invariants(), Ok(()));
}

#[test]
fn test_clear_invalidates_handles() {
    let mut heap = FibonacciHeap::new();
    let handle = heap.insert('x', 1);
    heap.clear();
    assert!(heap.is_empty());
    let fresh = heap.insert('y', 2);
    assert_ne!(handle, fresh);
    assert_eq!(heap.get(handle), None);
    assert_eq!(heap.get(fresh), Some((&'y', &2)));
}

#[test]
fn test_heap_error_display() {
    let err = HeapError::InvalidHandle;
    assert_eq!(
        err.to_string(),
        "handle is no longer valid (element was removed)"
    );
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_none());
}

#[test]
fn test_queue_max_order_comparator() {
    let mut queue = PriorityQueue::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    queue.push("low", 1);
    queue.push("high", 100);
    queue.push("mid", 50);
    assert_eq!(queue.delete_min_return_key(), Some("high"));
    // Under a reversed order a larger number is a decrease
    queue.change_priority("low", 75);
    assert_eq!(queue.delete_min(), Some(("low", 75)));
    assert_eq!(queue.delete_min(), Some(("mid", 50)));
    assert!(queue.is_empty());
}

#[test]
fn test_queue_increase_then_drain() {
    let mut queue: PriorityQueue<&str, i32> =
        vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();
    queue.delete_min();
    queue.change_priority("b", 10);
    assert_eq!(queue.priority("b"), Some(&10));

    let mut order = Vec::new();
    while let Some(key) = queue.delete_min_return_key() {
        order.push(key);
    }
    assert_eq!(order, vec!["c", "d", "b"]);
}

#[test]
fn test_queue_iter_and_debug() {
    let mut queue = PriorityQueue::new();
    queue.push(1u8, 'b');
    let mut seen: Vec<(u8, char)> = queue.iter().map(|(k, p)| (*k, *p)).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![(1, 'b')]);
    assert_eq!(format!("{:?}", queue), "{1: 'b'}");
}

#[test]
fn test_queue_to_dot() {
    let mut queue = PriorityQueue::new();
    queue.push("solo", 7);
    assert_eq!(
        queue.to_dot(),
        "digraph fibonacci_heap {\n  NODE0 [label=\"solo (7)\",shape=box];\n}\n"
    );

    queue.clear();
    assert_eq!(queue.to_dot(), "digraph fibonacci_heap {\n}\n");
}

#[test]
fn test_to_dot_escapes_quotes() {
    let mut heap = FibonacciHeap::new();
    heap.insert("say \"hi\"", 1);
    assert!(heap.to_dot().contains(r#"label="say \"hi\" (1)""#));
}

#[test]
fn test_to_dot_lists_every_node_and_edge() {
    let mut heap = FibonacciHeap::new();
    for i in 0..9 {
        heap.insert(i, i * 10);
    }
    heap.delete_min();

    // Eight nodes consolidate into a single binomial tree of degree 3
    let dot = heap.to_dot();
    assert_eq!(dot.lines().filter(|l| l.contains("[label=")).count(), 8);
    assert_eq!(dot.lines().filter(|l| l.contains(" -> ")).count(), 7);
    assert!(dot.starts_with("digraph fibonacci_heap {\n  NODE0 [label=\"1 (10)\",shape=box];\n"));
    assert!(dot.ends_with("}\n"));
}
