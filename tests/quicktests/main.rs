//! Property tests of the public API, checked against `BTreeSet` as a model.

mod avl;
mod red_black;

use std::collections::BTreeSet;
use std::fmt::Debug;

use balanced_bst::{Balance, Tree};
use log::LevelFilter;
use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, TestLogger};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the value into the data structure
    Insert(T),
    /// Remove the value from the data structure
    Remove(T),
    /// Compare iterators
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Applies a set of operations to a tree and a `BTreeSet`.
/// Returns whether they agreed on every result along the way.
pub(crate) fn do_ops<T, B>(ops: &[Op<T>], tree: &mut Tree<T, B>, model: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone + Debug,
    B: Balance,
{
    ops.iter().all(|op| match op {
        Op::Insert(value) => tree.insert(value.clone()) == model.insert(value.clone()),
        Op::Remove(value) => tree.remove(value) == model.take(value),
        Op::Iter => tree.iter().eq(model.iter()) && is_strictly_ascending(tree),
    })
}

pub(crate) fn is_strictly_ascending<T: Ord, B: Balance>(tree: &Tree<T, B>) -> bool {
    tree.in_order().windows(2).all(|pair| pair[0] < pair[1])
}

/// Largest height a tree with `len` values may have given `c * log2(len + 2)`.
pub(crate) fn height_bound(len: usize, c: f64) -> i32 {
    (c * ((len + 2) as f64).log2()).floor() as i32
}
