//! The seam between the shared tree engine and a balancing strategy.
//!
//! [`Tree`] does everything that does not depend on how balance is measured: searching,
//! attaching leaves, unlinking nodes (splicing in the predecessor when a node has two children),
//! and rotating. After each structural change it hands the affected spot to the strategy, which
//! walks upward repairing its own invariant with the rotations the engine provides.

use std::fmt;

use crate::arena::{NodeId, Side};
use crate::tree::Tree;

/// What [`Tree::remove`] reports to the strategy once the node is gone.
#[derive(Clone, Copy, Debug)]
pub struct Removal<M> {
    /// Metadata of the node that physically left its position. When the removed node had two
    /// children this is the predecessor's original metadata, since the predecessor took over the
    /// removed node's metadata along with its position.
    pub lost: M,
    /// The node that moved up into the vacated position, if any.
    pub child: Option<NodeId>,
    /// Parent of the vacated position and which of its links the position is. `None` when the
    /// vacated position is the root.
    pub parent: Option<(NodeId, Side)>,
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A rebalancing strategy for [`Tree`]. Implemented by [`Avl`][crate::Avl] and
/// [`RedBlack`][crate::RedBlack].
pub trait Balance: sealed::Sealed + Sized {
    /// Balance information stored in every node.
    type Meta: Copy + fmt::Debug;

    /// Metadata given to a freshly attached leaf.
    fn leaf() -> Self::Meta;

    /// Restores the invariant after `inserted` was attached as a leaf.
    fn insert_fixup<T>(tree: &mut Tree<T, Self>, inserted: NodeId);

    /// Restores the invariant after a node was unlinked.
    fn delete_fixup<T>(tree: &mut Tree<T, Self>, removal: Removal<Self::Meta>);

    /// Panics if any node violates the strategy's invariant.
    #[cfg(test)]
    fn assert_balanced<T>(tree: &Tree<T, Self>);
}
