//! Helpers shared by the unit tests of every tree.

use std::collections::BTreeSet;
use std::fmt::Debug;

use log::LevelFilter;
use simplelog::{Config, TestLogger};

use crate::arena::{NodeId, Side};
use crate::balance::Balance;
use crate::tree::Tree;


use quick::Op;

/// Sends the trees' logs to the test harness. Safe to call from every test.
pub(crate) fn init_logging() {
    // Only the first call in a test binary installs the logger.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Panics unless `tree` is a valid search tree with consistent links that also satisfies its
/// strategy's balance invariant.
pub(crate) fn assert_invariants<T, B>(tree: &Tree<T, B>)
where
    T: Ord + Debug,
    B: Balance,
{
    if let Some(root) = tree.root() {
        assert_eq!(tree.parent(root), None, "root has a parent");
    }

    let mut count = 0;
    let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
    while let Some(id) = stack.pop() {
        count += 1;
        for side in [Side::Left, Side::Right] {
            if let Some(child) = tree.child(id, side) {
                assert_eq!(tree.parent(child), Some(id), "broken parent link under {:?}", id);
                stack.push(child);
            }
        }
    }
    assert_eq!(count, tree.len(), "len disagrees with the reachable nodes");

    let values = tree.in_order();
    assert!(
        values.windows(2).all(|pair| pair[0] < pair[1]),
        "not strictly ascending: {:?}",
        values
    );

    B::assert_balanced(tree);
}

/// Applies a set of operations to a tree and a `BTreeSet`, checking that both agree on every
/// result and that the tree's invariants hold after each step.
pub(crate) fn do_ops<T, B>(ops: &[Op<T>], tree: &mut Tree<T, B>, model: &mut BTreeSet<T>)
where
    T: Ord + Clone + Debug,
    B: Balance,
{
    for op in ops {
        match op {
            Op::Insert(value) => {
                assert_eq!(tree.insert(value.clone()), model.insert(value.clone()));
            }
            Op::Remove(value) => {
                assert_eq!(tree.remove(value), model.take(value));
            }
            Op::Iter => {
                assert!(tree.iter().eq(model.iter()));
            }
        }
        assert_invariants(tree);
    }
}
