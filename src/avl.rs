//! A height-balanced (AVL) tree.
//!
//! Every node stores the height of its subtree. After an insert or remove, every ancestor of the
//! changed position has its height recomputed and, if its children's heights differ by more than
//! one, is rotated back into balance. The walk always runs to the root: after a removal a
//! rotation can shrink a subtree and expose an imbalance further up.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Ascending inserts would make a plain BST a linked list.
//! for x in 0..1023 {
//!     tree.insert(x);
//! }
//!
//! // A perfectly balanced tree with 1023 nodes has height 9.
//! assert_eq!(tree.height(), 9);
//! assert_eq!(tree.min(), Ok(&0));
//! assert_eq!(tree.max(), Ok(&1022));
//! ```

use log::trace;

use crate::arena::NodeId;
use crate::balance::{sealed, Balance, Removal};
use crate::tree::Tree;

/// The AVL balancing strategy: the heights of any node's two subtrees differ by at most one.
#[derive(Debug)]
pub enum Avl {}

/// An ordered set kept height-balanced.
pub type AvlTree<T> = Tree<T, Avl>;

impl sealed::Sealed for Avl {}

impl Balance for Avl {
    /// Height of the subtree rooted at the node. A leaf has height 0.
    type Meta = i32;

    fn leaf() -> i32 {
        0
    }

    fn insert_fixup<T>(tree: &mut Tree<T, Self>, inserted: NodeId) {
        let parent = tree.parent(inserted);
        balance_to_root(tree, parent);
    }

    fn delete_fixup<T>(tree: &mut Tree<T, Self>, removal: Removal<i32>) {
        balance_to_root(tree, removal.parent.map(|(parent, _)| parent));
    }

    #[cfg(test)]
    fn assert_balanced<T>(tree: &Tree<T, Self>) {
        let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            let left_height = height(tree, tree.left(id));
            let right_height = height(tree, tree.right(id));
            assert_eq!(tree.meta(id), left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= 1);
            stack.extend(tree.left(id));
            stack.extend(tree.right(id));
        }
    }
}

/// Height of a possibly empty subtree. The empty subtree has height -1.
fn height<T>(tree: &AvlTree<T>, id: Option<NodeId>) -> i32 {
    id.map_or(-1, |id| tree.meta(id))
}

/// Adjusts the height of `id` to be the max of its children's heights + 1.
fn fix_height<T>(tree: &mut AvlTree<T>, id: NodeId) {
    let left_height = height(tree, tree.left(id));
    let right_height = height(tree, tree.right(id));
    tree.set_meta(id, left_height.max(right_height) + 1);
}

/// The difference in height between the left and right subtrees. See [the Wikipedia
/// page][wiki] for more details.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
fn balance_factor<T>(tree: &AvlTree<T>, id: NodeId) -> i32 {
    height(tree, tree.left(id)) - height(tree, tree.right(id))
}

fn rotate_left<T>(tree: &mut AvlTree<T>, id: NodeId) -> NodeId {
    let new_root = tree.rotate_left(id);
    fix_height(tree, id);
    fix_height(tree, new_root);
    new_root
}

fn rotate_right<T>(tree: &mut AvlTree<T>, id: NodeId) -> NodeId {
    let new_root = tree.rotate_right(id);
    fix_height(tree, id);
    fix_height(tree, new_root);
    new_root
}

/// Balances every node from `cursor` up to the root.
fn balance_to_root<T>(tree: &mut AvlTree<T>, mut cursor: Option<NodeId>) {
    while let Some(id) = cursor {
        let subtree_root = balance(tree, id);
        cursor = tree.parent(subtree_root);
    }
}

/// Restores the height and balance of the subtree at `id`, whose children are already balanced.
/// Returns the subtree's root afterwards, which differs from `id` if a rotation happened.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
fn balance<T>(tree: &mut AvlTree<T>, id: NodeId) -> NodeId {
    fix_height(tree, id);
    let subtree_root = match (balance_factor(tree, id), tree.left(id), tree.right(id)) {
        (2, Some(left), _) => {
            if balance_factor(tree, left) < 0 {
                trace!("left-right imbalance at {:?}", id);
                rotate_left(tree, left);
            } else {
                trace!("left-left imbalance at {:?}", id);
            }
            rotate_right(tree, id)
        }
        (-2, _, Some(right)) => {
            if balance_factor(tree, right) > 0 {
                trace!("right-left imbalance at {:?}", id);
                rotate_right(tree, right);
            } else {
                trace!("right-right imbalance at {:?}", id);
            }
            rotate_left(tree, id)
        }
        _ => id,
    };

    if cfg!(debug_assertions) {
        let left_height = height(tree, tree.left(subtree_root));
        let right_height = height(tree, tree.right(subtree_root));
        assert_eq!(tree.meta(subtree_root), left_height.max(right_height) + 1);
        assert!((left_height - right_height).abs() <= 1);
    }
    subtree_root
}
