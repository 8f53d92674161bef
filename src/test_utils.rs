use std::fmt::Debug;

use proptest::prelude::*;

use crate::{node::Node, IntervalTree};

const RANGE_MAX: u16 = 20;

/// Generate arbitrary valid `(low, high)` bounds in [0..[`RANGE_MAX`]).
pub(crate) fn arbitrary_bounds() -> impl Strategy<Value = (u16, u16)> {
    (0..RANGE_MAX, 0..RANGE_MAX).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

/// Assert the BST, AVL and interval tree properties of tree nodes, ensuring
/// the tree is well-formed.
pub(crate) fn validate_tree_structure<R, V, E>(t: &IntervalTree<R, V, E>)
where
    R: Ord + Clone + Debug,
    V: Debug,
{
    let root = match t.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            return;
        }
    };

    let mut n_records = 0;
    let mut n_nodes = 0;

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: a node is never empty, and every record in it starts
        // at the node key.
        assert!(!n.records().is_empty());
        for r in n.records() {
            assert_eq!(r.interval().low(), n.key());
        }
        n_records += n.records().len();
        n_nodes += 1;

        // Invariant 2: the left child always contains a key strictly less
        // than this node, and the right child strictly greater (keys are
        // unique).
        assert!(n.left().map(|v| v.key() < n.key()).unwrap_or(true));
        assert!(n.right().map(|v| v.key() > n.key()).unwrap_or(true));

        // Invariant 3: the height of this node is always +1 of the
        // maximum child height.
        let left_height = n.left().map(|v| v.height() as i16).unwrap_or(-1);
        let right_height = n.right().map(|v| v.height() as i16).unwrap_or(-1);
        let want_height = left_height.max(right_height) + 1;

        assert_eq!(
            n.height() as i16,
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            n.key(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot
        // exceed 1.
        let balance = (left_height - right_height).abs();
        assert!(balance <= 1, "balance={balance}, node={n:?}");

        // Invariant 5: the subtree max of "n" is the largest upper bound of
        // any record in the subtree, computed by brute force.
        assert_eq!(n.subtree_max(), &brute_force_max(n), "node={n:?}");
    }

    // The in-order walk yields keys in non-descending order, and no two
    // nodes share a key.
    let mut keys = t.iter().map(|(i, _)| i.low()).collect::<Vec<_>>();
    for window in keys.windows(2) {
        assert!(window[0] <= window[1]);
    }
    keys.dedup();
    assert_eq!(keys.len(), n_nodes);

    assert_eq!(n_records, t.len());
}

fn brute_force_max<R, V>(n: &Node<R, V>) -> R
where
    R: Ord + Clone,
{
    let mut max = n.node_high().clone();
    for child in [n.left(), n.right()].into_iter().flatten() {
        max = max.max(brute_force_max(child));
    }
    max
}
