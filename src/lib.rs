//! This crate exposes self-balancing Binary Search Trees (BSTs): an AVL tree and a red-black tree
//! built on one shared engine.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)`, where `height` is the longest path from
//! the root `Node` to a leaf `Node`. Inserting values in sorted order into a plain BST makes that
//! path as long as the tree is big. A self-balancing BST restructures itself with rotations after
//! every insert and delete so the height stays `O(lg N)`.
//!
//! ## Balancing strategies
//!
//! - [`AvlTree`] keeps the heights of every node's two subtrees within one of each other.
//! - [`RedBlackTree`] colors nodes red or black and keeps the same number of black nodes on every
//!   path down from any node.
//!
//! Both are aliases of [`Tree`] with a different [`Balance`] strategy, so they share searching,
//! rotations, and deletion (which replaces a node with two children by its predecessor).
//!
//! ## Storage
//!
//! Nodes live in a single arena and link to each other with indices. Parent links are plain
//! indices used to walk back up while rebalancing. Nothing in the crate recurses, so even very
//! large trees cannot overflow the stack.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, RedBlackTree};
//!
//! let mut avl: AvlTree<_> = (1..=100).collect();
//! let mut red_black: RedBlackTree<_> = (1..=100).rev().collect();
//!
//! for x in (1..=100).step_by(2) {
//!     avl.remove(&x);
//!     red_black.remove(&x);
//! }
//!
//! assert!(avl.iter().eq(red_black.iter()));
//! assert_eq!(avl.min(), Ok(&2));
//! assert_eq!(red_black.max(), Ok(&100));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]
#![forbid(unsafe_code)]

mod arena;
pub mod avl;
mod balance;
mod error;
mod iter;
pub mod red_black;
mod tree;

#[cfg(test)]
mod test;

pub use avl::{Avl, AvlTree};
pub use balance::Balance;
pub use error::{Result, TreeError};
pub use iter::{IntoIter, Iter};
pub use red_black::{Color, RedBlack, RedBlackTree};
pub use tree::Tree;
