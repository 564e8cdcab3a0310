//! A color-balanced (red-black) tree.
//!
//! Every node is red or black, and empty positions count as black. The tree keeps these
//! invariants:
//!
//! 1. The root is black.
//! 2. A red node never has a red parent.
//! 3. Every path from a node down to an empty position passes through the same number of black
//!    nodes (the node's black-height).
//!
//! Together they keep the longest root-to-leaf path at most twice as long as the shortest.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for x in (0..100).rev() {
//!     tree.insert(x);
//! }
//! for x in (0..100).filter(|x| x % 3 == 0) {
//!     assert_eq!(tree.remove(&x), Some(x));
//! }
//!
//! assert_eq!(tree.len(), 66);
//! assert_eq!(tree.min(), Ok(&1));
//! assert!(tree.height() <= 2 * 7);
//! ```

use log::trace;

use crate::arena::{NodeId, Side};
use crate::balance::{sealed, Balance, Removal};
use crate::tree::Tree;

/// The color tag of a red-black node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// A node that doesn't count towards black-height. Its parent is never red.
    Red,
    /// A node that counts towards black-height.
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }
}

/// The red-black balancing strategy.
#[derive(Debug)]
pub enum RedBlack {}

/// An ordered set kept color-balanced.
pub type RedBlackTree<T> = Tree<T, RedBlack>;

impl sealed::Sealed for RedBlack {}

impl Balance for RedBlack {
    type Meta = Color;

    fn leaf() -> Color {
        Color::Red
    }

    /// Repairs a red node with a red parent, walking up from the new leaf. The parent's side
    /// decides the mirroring; `side` below is the side the parent hangs from.
    ///
    /// | uncle | node is         | action                                                      |
    /// |-------|-----------------|-------------------------------------------------------------|
    /// | red   | either child    | parent, uncle black; grandparent red; continue at grandparent |
    /// | black | inner grandchild| rotate parent towards `side`, the node and parent swap roles |
    /// | black | outer grandchild| rotate grandparent away from `side`, swap their colors; done |
    fn insert_fixup<T>(tree: &mut Tree<T, Self>, inserted: NodeId) {
        let mut node = inserted;
        while let Some(mut parent) = tree.parent(node).filter(|&p| is_red(tree, Some(p))) {
            // A red parent is never the root, so there is a grandparent.
            let Some(grandparent) = tree.parent(parent) else {
                break;
            };
            let side = tree.side_of(grandparent, parent);
            let uncle = tree.child(grandparent, side.opposite());

            if is_red(tree, uncle) {
                trace!("recoloring around {:?}", grandparent);
                paint(tree, parent, Color::Black);
                paint(tree, grandparent, Color::Red);
                if let Some(uncle) = uncle {
                    paint(tree, uncle, Color::Black);
                }
                node = grandparent;
                continue;
            }

            if tree.side_of(parent, node) != side {
                trace!("inner grandchild {:?}, rotating {:?}", node, parent);
                tree.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }

            trace!("outer grandchild {:?}, rotating {:?}", node, grandparent);
            tree.rotate(grandparent, side.opposite());
            paint(tree, parent, Color::Black);
            paint(tree, grandparent, Color::Red);
            break;
        }

        paint_root_black(tree);
        if cfg!(debug_assertions) {
            if let Some(parent) = tree.parent(node) {
                assert!(!(is_red(tree, Some(node)) && is_red(tree, Some(parent))));
            }
        }
    }

    /// Restores equal black-heights after a node left the tree.
    ///
    /// Removing a red node, or one whose replacement is red (which is then painted black), keeps
    /// every black-height. Otherwise the vacated position `x` is one black short: it is "doubly
    /// black". With `p` its parent, `s` its sibling, and `near`/`far` the sibling's children
    /// nearer to and farther from `x`:
    ///
    /// | case | `s`   | `near` | `far` | action                                                  | next                     |
    /// |------|-------|--------|-------|---------------------------------------------------------|--------------------------|
    /// | 1    | red   | black  | black | `s` black, `p` red, rotate `p` towards `x`              | cases 2-4 at the same `x`|
    /// | 2    | black | black  | black | `s` red                                                 | done if `p` was red (paint it black), else `x = p` |
    /// | 3    | black | red    | black | `near` black, `s` red, rotate `s` away from `x`          | case 4                   |
    /// | 4    | black | any    | red   | `s` takes `p`'s color, `p` and `far` black, rotate `p` towards `x` | done        |
    ///
    /// Each case applies mirrored when `x` is a right child. Only case 2 moves up, so the walk is
    /// bounded by the height.
    fn delete_fixup<T>(tree: &mut Tree<T, Self>, removal: Removal<Color>) {
        if removal.lost.is_red() {
            return;
        }
        if let Some(child) = removal.child.filter(|&c| is_red(tree, Some(c))) {
            trace!("painting replacement {:?} black", child);
            paint(tree, child, Color::Black);
            return;
        }

        let mut position = removal.parent;
        while let Some((parent, side)) = position {
            // A doubly black position always has a sibling of black-height at least one.
            let Some(mut sibling) = tree.child(parent, side.opposite()) else {
                break;
            };

            if is_red(tree, Some(sibling)) {
                trace!("case 1 at {:?}: red sibling {:?}", parent, sibling);
                paint(tree, sibling, Color::Black);
                paint(tree, parent, Color::Red);
                tree.rotate(parent, side);
                match tree.child(parent, side.opposite()) {
                    Some(next) => sibling = next,
                    None => break,
                }
            }

            let near = tree.child(sibling, side);
            let far = tree.child(sibling, side.opposite());

            if !is_red(tree, near) && !is_red(tree, far) {
                trace!("case 2 at {:?}: black sibling {:?} with black children", parent, sibling);
                paint(tree, sibling, Color::Red);
                if is_red(tree, Some(parent)) {
                    paint(tree, parent, Color::Black);
                    break;
                }
                position = tree.position(parent);
                continue;
            }

            let far = match (near, far) {
                (Some(near), far) if !is_red(tree, far) => {
                    trace!("case 3 at {:?}: red near nephew {:?}", parent, near);
                    paint(tree, near, Color::Black);
                    paint(tree, sibling, Color::Red);
                    tree.rotate(sibling, side.opposite());
                    // The old sibling is now the far nephew.
                    let far = sibling;
                    sibling = near;
                    far
                }
                (_, Some(far)) => far,
                // One of the nephews is red, so one of the arms above matched.
                (_, None) => break,
            };

            trace!("case 4 at {:?}: red far nephew {:?}", parent, far);
            let parent_color = tree.meta(parent);
            paint(tree, sibling, parent_color);
            paint(tree, parent, Color::Black);
            paint(tree, far, Color::Black);
            tree.rotate(parent, side);
            break;
        }

        paint_root_black(tree);
    }

    #[cfg(test)]
    fn assert_balanced<T>(tree: &Tree<T, Self>) {
        if let Some(root) = tree.root() {
            assert!(tree.meta(root).is_black(), "red root");
            black_height(tree, Some(root));
        }
    }
}

fn is_red<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> bool {
    id.map_or(false, |id| tree.meta(id).is_red())
}

fn paint<T>(tree: &mut RedBlackTree<T>, id: NodeId, color: Color) {
    tree.set_meta(id, color);
}

fn paint_root_black<T>(tree: &mut RedBlackTree<T>) {
    if let Some(root) = tree.root() {
        paint(tree, root, Color::Black);
    }
}

/// Black-height of the subtree at `id`, counting the empty positions below it. Panics on a red
/// node with a red child or unequal black-heights.
#[cfg(test)]
fn black_height<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> usize {
    // Post-order over an explicit stack: (node, children done).
    let mut heights: std::collections::HashMap<NodeId, usize> = std::collections::HashMap::new();
    let mut stack: Vec<(NodeId, bool)> = id.into_iter().map(|id| (id, false)).collect();
    let below = |heights: &std::collections::HashMap<NodeId, usize>, child: Option<NodeId>| {
        child.map_or(1, |child| heights[&child])
    };

    while let Some((node, children_done)) = stack.pop() {
        let (left, right) = (tree.left(node), tree.right(node));
        if !children_done {
            stack.push((node, true));
            stack.extend(left.map(|id| (id, false)));
            stack.extend(right.map(|id| (id, false)));
            continue;
        }

        if is_red(tree, Some(node)) {
            assert!(!is_red(tree, left) && !is_red(tree, right), "red node {:?} has a red child", node);
        }
        let (left_height, right_height) = (below(&heights, left), below(&heights, right));
        assert_eq!(left_height, right_height, "unequal black-heights under {:?}", node);
        let own = if tree.meta(node).is_black() { 1 } else { 0 };
        heights.insert(node, left_height + own);
    }

    id.map_or(1, |id| heights[&id])
}
