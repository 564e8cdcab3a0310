use std::collections::BTreeSet;

use balanced_bst::{AvlTree, TreeError};

use crate::{do_ops, height_bound, init_logging, Op};

#[test]
fn ascending_inserts_rotate_left() {
    init_logging();
    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(20);
    tree.insert(30);

    assert_eq!(tree.level_order(), vec![vec![&20], vec![&10, &30]]);
    assert_eq!(tree.height(), 1);
}

#[test]
fn remove_root_with_two_children() {
    let mut tree: AvlTree<_> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();

    assert_eq!(tree.remove(&50), Some(50));
    assert_eq!(tree.level_order()[0], [&40]);
    assert_eq!(tree.in_order(), [&20, &30, &40, &60, &70, &80]);
}

#[test]
fn removing_the_only_value() {
    let mut tree = AvlTree::new();
    tree.insert("only");

    assert_eq!(tree.remove(&"only"), Some("only"));
    assert!(tree.is_empty());
    assert_eq!(tree.min(), Err(TreeError::EmptyTree));
    assert_eq!(tree.max(), Err(TreeError::EmptyTree));
}

#[test]
fn large_tree_does_not_overflow_the_stack() {
    let mut tree: AvlTree<u32> = (0..200_000).collect();
    assert!(tree.height() <= height_bound(tree.len(), 1.44));

    let copy = tree.clone();
    for x in (0..200_000).filter(|x| x % 2 == 1) {
        tree.remove(&x);
    }
    assert_eq!(tree.len(), 100_000);
    assert_eq!(copy.len(), 200_000);
    assert_eq!(tree.into_iter().step_by(1000).take(3).collect::<Vec<_>>(), [0, 2000, 4000]);
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut model)
            && tree.iter().eq(model.iter())
            && tree.len() == model.len()
    }

    fn fuzz_multiple_operations_i32(ops: Vec<Op<i32>>) -> bool {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut model) && tree.iter().eq(model.iter())
    }

    fn insert_twice_is_idempotent(xs: Vec<i16>) -> bool {
        let once: AvlTree<_> = xs.iter().copied().collect();
        let twice: AvlTree<_> = xs.iter().chain(&xs).copied().collect();

        once == twice && once.in_order() == twice.in_order()
    }

    fn round_trip_leaves_empty(xs: Vec<i16>) -> bool {
        let mut tree: AvlTree<_> = xs.iter().copied().collect();
        for x in &xs {
            tree.remove(x);
        }

        tree.is_empty() && tree.in_order().is_empty()
    }

    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let tree: AvlTree<_> = xs.into_iter().collect();

        tree.height() <= height_bound(tree.len(), 1.44)
    }

    fn min_max_match_model(xs: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let model: BTreeSet<_> = xs.into_iter().collect();

        tree.min().ok() == model.iter().next() && tree.max().ok() == model.iter().next_back()
    }
}
