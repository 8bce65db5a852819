use std::fmt::Debug;

use proptest::prelude::*;

use crate::{interval::Interval, node::Node, IntervalTree};

const BOUND_MAX: i64 = 40;

/// Construct a valid [`Interval`], panicking if `low > high`.
pub(crate) fn iv(low: i64, high: i64) -> Interval<i64> {
    Interval::new(low, high).unwrap()
}

/// Generate arbitrary valid intervals with bounds from [0..[`BOUND_MAX`]).
///
/// A small bound domain encourages overlapping intervals and duplicate lower
/// bounds.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<i64>> {
    (0..BOUND_MAX, 0..BOUND_MAX).prop_map(|(a, b)| iv(a.min(b), a.max(b)))
}

/// The ten intervals inserted by the example driver, in insertion order.
pub(crate) fn example_intervals() -> Vec<Interval<i64>> {
    [
        (0, 3),
        (6, 10),
        (5, 8),
        (19, 20),
        (17, 19),
        (26, 26),
        (8, 9),
        (16, 21),
        (25, 30),
        (15, 23),
    ]
    .into_iter()
    .map(|(l, h)| iv(l, h))
    .collect()
}

/// Assert the BST, AVL and interval tree properties of all tree nodes,
/// ensuring the tree is well-formed.
pub(crate) fn validate_tree_structure<R>(t: &IntervalTree<R>)
where
    R: Ord + Debug + Clone,
{
    let root = match t.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            return;
        }
    };

    let mut n_nodes = 0;

    // Perform a pre-order traversal of the tree.
    let mut stack: Vec<&Node<R>> = vec![root];
    while let Some(n) = stack.pop() {
        n_nodes += 1;

        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: the left child always has a lower bound strictly less
        // than this node.
        assert!(n
            .left()
            .map(|v| v.interval().low() < n.interval().low())
            .unwrap_or(true));

        // Invariant 2: the right child always has a lower bound strictly
        // greater than this node.
        assert!(n
            .right()
            .map(|v| v.interval().low() > n.interval().low())
            .unwrap_or(true));

        // Invariant 3: the height of this node is always +1 of the maximum
        // child height, with an absent child at height -1.
        let left_height = n.left().map(|v| v.height() as i16).unwrap_or(-1);
        let right_height = n.right().map(|v| v.height() as i16).unwrap_or(-1);
        let want_height = left_height.max(right_height) + 1;

        assert_eq!(
            n.height() as i16,
            want_height,
            "expect node with interval {:?} to have height {}, has {}",
            n.interval(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot exceed 1.
        let balance = (left_height - right_height).abs();
        assert!(balance <= 1, "balance={balance}, node={n:?}");

        // Invariant 5: the max_high of "n" must be equal to either the largest
        // of the two child max_high values, or its own upper bound.
        let child_max = n
            .left()
            .map(|v| v.max_high())
            .max(n.right().map(|v| v.max_high()));
        let want_max = child_max.max(Some(n.interval().high())).unwrap();
        assert_eq!(want_max, n.max_high());
    }

    // The tracked length matches the number of reachable nodes.
    assert_eq!(n_nodes, t.len());
}
