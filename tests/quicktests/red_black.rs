use std::collections::BTreeSet;

use balanced_bst::{RedBlackTree, TreeError};

use crate::{do_ops, height_bound, init_logging, is_strictly_ascending, Op};

#[test]
fn ascending_inserts_rotate_left() {
    init_logging();
    let mut tree = RedBlackTree::new();
    tree.insert(10);
    tree.insert(20);
    tree.insert(30);

    assert_eq!(tree.level_order(), vec![vec![&20], vec![&10, &30]]);
}

#[test]
fn remove_root_with_two_children() {
    let mut tree: RedBlackTree<_> = [50, 30, 70].into_iter().collect();

    assert_eq!(tree.remove(&50), Some(50));
    assert_eq!(tree.level_order(), vec![vec![&30], vec![&70]]);
    assert!(is_strictly_ascending(&tree));
}

#[test]
fn removing_the_only_value() {
    let mut tree = RedBlackTree::new();
    tree.insert('x');

    assert_eq!(tree.remove(&'x'), Some('x'));
    assert!(tree.is_empty());
    assert_eq!(tree.min(), Err(TreeError::EmptyTree));
    assert_eq!(tree.max(), Err(TreeError::EmptyTree));
}

#[test]
fn large_tree_does_not_overflow_the_stack() {
    let mut tree: RedBlackTree<u32> = (0..200_000).rev().collect();
    assert!(tree.height() <= height_bound(tree.len(), 2.0));

    for x in 0..199_990 {
        tree.remove(&x);
    }
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.min(), Ok(&199_990));
    assert!(tree.height() <= height_bound(tree.len(), 2.0));
}

#[test]
fn try_insert_reports_new_values() {
    let mut tree = RedBlackTree::new();

    assert_eq!(tree.try_insert(1), Ok(true));
    assert_eq!(tree.try_insert(1), Ok(false));
    assert_eq!(tree.len(), 1);
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut model)
            && tree.iter().eq(model.iter())
            && tree.len() == model.len()
    }

    fn fuzz_multiple_operations_i32(ops: Vec<Op<i32>>) -> bool {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut model) && tree.iter().eq(model.iter())
    }

    fn insert_twice_is_idempotent(xs: Vec<i16>) -> bool {
        let once: RedBlackTree<_> = xs.iter().copied().collect();
        let twice: RedBlackTree<_> = xs.iter().chain(&xs).copied().collect();

        once == twice
    }

    fn round_trip_leaves_empty(xs: Vec<i16>) -> bool {
        let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
        for x in &xs {
            tree.remove(x);
        }

        tree.is_empty() && tree.in_order().is_empty()
    }

    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let tree: RedBlackTree<_> = xs.into_iter().collect();

        tree.height() <= height_bound(tree.len(), 2.0)
    }

    fn owned_iteration_matches_model(xs: Vec<String>) -> bool {
        let tree: RedBlackTree<_> = xs.iter().cloned().collect();
        let model: BTreeSet<_> = xs.into_iter().collect();

        tree.into_iter().eq(model)
    }
}
