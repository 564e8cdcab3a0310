//! The balancing-agnostic engine behind [`AvlTree`][crate::AvlTree] and
//! [`RedBlackTree`][crate::RedBlackTree].
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, TreeError};
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.min(), Err(TreeError::EmptyTree));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same value again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a value hands it back.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert!(tree.is_empty());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter;
use std::marker::PhantomData;

use log::{debug, trace};

use crate::arena::{Arena, Node, NodeId, Side};
use crate::balance::{Balance, Removal};
use crate::error::{Result, TreeError};
use crate::iter::{IntoIter, Iter, Walk};

/// Where a search for a value ended.
enum Locate {
    Found(NodeId),
    /// The value isn't in the tree. A node holding it would hang from this parent and side, or
    /// be the root when this is `None`.
    Vacant(Option<(NodeId, Side)>),
}

/// An ordered set of distinct values kept balanced by the strategy `B`.
///
/// Use the [`AvlTree`][crate::AvlTree] and [`RedBlackTree`][crate::RedBlackTree] aliases rather
/// than naming the strategy.
pub struct Tree<T, B: Balance> {
    pub(crate) arena: Arena<T, B::Meta>,
    pub(crate) root: Option<NodeId>,
    marker: PhantomData<B>,
}

impl<T, B: Balance> Default for Tree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B: Balance> Clone for Tree<T, B>
where
    T: Clone,
{
    // Handles are indices so copying the slots copies the shape, links included.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            marker: PhantomData,
        }
    }
}

impl<T, B: Balance> fmt::Debug for Tree<T, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, B: Balance> PartialEq for Tree<T, B>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, B: Balance> Eq for Tree<T, B> where T: Eq {}

impl<T, B: Balance> FromIterator<T> for Tree<T, B>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

impl<T, B: Balance> Extend<T> for Tree<T, B>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<'a, T, B: Balance> IntoIterator for &'a Tree<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, B: Balance> IntoIterator for Tree<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the tree, yielding its values in ascending order.
    fn into_iter(self) -> Self::IntoIter {
        let mut walk = Walk::new(&self.arena, self.root);
        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = walk.next(&self.arena) {
            order.push(id);
        }
        IntoIter::new(self.arena.into_values(), order)
    }
}

impl<T, B: Balance> Tree<T, B> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generates a new, empty `Tree` with room for `capacity` values before its node storage has
    /// to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            marker: PhantomData,
        }
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Whether the tree holds a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = ["b", "a"].into_iter().map(String::from).collect();
    ///
    /// assert!(tree.contains("a"));
    /// assert!(!tree.contains("c"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).is_some()
    }

    /// The stored value equal to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map(|id| &self.arena[id].value)
    }

    /// Inserts `value`, rebalancing afterwards. Returns `false`, leaving the tree untouched, when
    /// an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert!(tree.insert(3));
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(3));
    ///
    /// assert_eq!(tree.in_order(), [&1, &3]);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        match self.locate(&value) {
            Locate::Found(_) => false,
            Locate::Vacant(position) => {
                self.attach(value, position);
                true
            }
        }
    }

    /// Like [`Tree::insert`] but reports a failure to allocate the new node instead of aborting.
    /// Space is reserved before any link changes, so on error the tree is exactly as it was.
    pub fn try_insert(&mut self, value: T) -> Result<bool>
    where
        T: Ord,
    {
        match self.locate(&value) {
            Locate::Found(_) => Ok(false),
            Locate::Vacant(position) => {
                self.arena.try_reserve()?;
                self.attach(value, position);
                Ok(true)
            }
        }
    }

    /// Removes the value equal to `value` and returns it, rebalancing afterwards. If the tree does
    /// not contain such a value, nothing happens.
    ///
    /// A node with two children is replaced by its predecessor, the largest value of its left
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = [50, 30, 70].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&50), Some(50));
    /// assert_eq!(tree.remove(&50), None);
    /// assert_eq!(tree.in_order(), [&30, &70]);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(value)?;
        let removal = self.unlink(id);
        let node = self.arena.free(id);
        B::delete_fixup(self, removal);
        Some(node.value)
    }

    /// The smallest value.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree has no values.
    pub fn min(&self) -> Result<&T> {
        self.root
            .map(|root| &self.arena[self.extreme(root, Side::Left)].value)
            .ok_or(TreeError::EmptyTree)
    }

    /// The largest value.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree has no values.
    pub fn max(&self) -> Result<&T> {
        self.root
            .map(|root| &self.arena[self.extreme(root, Side::Right)].value)
            .ok_or(TreeError::EmptyTree)
    }

    /// Number of links on the longest path from the root to a leaf. A single node has height 0
    /// and the empty tree has height -1.
    pub fn height(&self) -> i32 {
        self.levels().count() as i32 - 1
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(self)
    }

    /// A fresh ascending sequence of every value.
    pub fn in_order(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// The values grouped by depth, root first, each level ordered left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree: AvlTree<_> = (1..=5).collect();
    ///
    /// assert_eq!(tree.level_order(), vec![vec![&2], vec![&1, &4], vec![&3, &5]]);
    /// ```
    pub fn level_order(&self) -> Vec<Vec<&T>> {
        self.levels()
            .map(|level| level.into_iter().map(|id| &self.arena[id].value).collect())
            .collect()
    }

    fn levels(&self) -> impl Iterator<Item = Vec<NodeId>> + '_ {
        let first: Vec<NodeId> = self.root.into_iter().collect();
        iter::successors(Some(first), move |level| {
            let next: Vec<NodeId> = level
                .iter()
                .flat_map(|&id| {
                    let node = &self.arena[id];
                    node.left.into_iter().chain(node.right)
                })
                .collect();
            (!next.is_empty()).then_some(next)
        })
        .filter(|level| !level.is_empty())
    }

    fn locate<Q>(&self, value: &Q) -> Locate
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut position = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let side = match value.cmp(self.arena[id].value.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Locate::Found(id),
                Ordering::Greater => Side::Right,
            };
            position = Some((id, side));
            cursor = self.child(id, side);
        }
        Locate::Vacant(position)
    }

    pub(crate) fn find_node<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(value) {
            Locate::Found(id) => Some(id),
            Locate::Vacant(_) => None,
        }
    }

    fn attach(&mut self, value: T, position: Option<(NodeId, Side)>) {
        let parent = position.map(|(parent, _)| parent);
        let id = self.arena.alloc(Node::leaf(value, B::leaf(), parent));
        self.link(position, Some(id));
        B::insert_fixup(self, id);
    }

    /// Detaches `id` from the tree while keeping search order. The node stays in the arena for the
    /// caller to free.
    fn unlink(&mut self, id: NodeId) -> Removal<B::Meta> {
        let position = self.position(id);
        let node = &self.arena[id];
        let (meta, left, right) = (node.meta, node.left, node.right);

        match (left, right) {
            (None, None) => {
                debug!("removing leaf {:?}", id);
                self.link(position, None);
                Removal {
                    lost: meta,
                    child: None,
                    parent: position,
                }
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("removing {:?}, splicing up its only child {:?}", id, child);
                self.link(position, Some(child));
                Removal {
                    lost: meta,
                    child: Some(child),
                    parent: position,
                }
            }
            (Some(left), Some(right)) => {
                // The predecessor is the rightmost node of the left subtree. `gap` tracks the link
                // it hangs from.
                let mut gap = (id, Side::Left);
                let mut predecessor = left;
                while let Some(next) = self.right(predecessor) {
                    gap = (predecessor, Side::Right);
                    predecessor = next;
                }
                debug!("removing {:?}, replacing it with predecessor {:?}", id, predecessor);

                let lost = self.meta(predecessor);
                let orphan = self.left(predecessor);
                let gap = if gap.0 == id {
                    // The predecessor is the left child itself. It moves up keeping its left
                    // subtree, so the gap is below it.
                    (predecessor, Side::Left)
                } else {
                    self.set_child(gap.0, Side::Right, orphan);
                    self.set_child(predecessor, Side::Left, Some(left));
                    gap
                };
                self.set_child(predecessor, Side::Right, Some(right));
                self.link(position, Some(predecessor));
                self.set_meta(predecessor, meta);

                Removal {
                    lost,
                    child: orphan,
                    parent: Some(gap),
                }
            }
        }
    }

    /// Rotates the subtree rooted at `id` so that `id` moves down towards `side` and its child on
    /// the opposite side takes its place. Returns the new root of the subtree.
    ///
    /// ## Panics
    ///
    /// When `id` has no child on the opposite side.
    ///
    /// # Diagram
    ///
    /// Rotating towards [`Side::Right`]:
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///     id                       riser
    ///    /  \                      /   \
    /// riser  z     rotate ->      x     id
    ///  / \                             /  \
    /// x   y                           y    z
    /// ```
    pub(crate) fn rotate(&mut self, id: NodeId, side: Side) -> NodeId {
        let riser = self
            .child(id, side.opposite())
            .expect("Rotating a node requires a child to lift");
        trace!("rotating {:?} {:?}, lifting {:?}", id, side, riser);

        let position = self.position(id);
        let inner = self.child(riser, side);
        self.set_child(id, side.opposite(), inner);
        self.link(position, Some(riser));
        self.set_child(riser, side, Some(id));
        riser
    }

    /// Left rotation: the right child rises.
    pub(crate) fn rotate_left(&mut self, id: NodeId) -> NodeId {
        self.rotate(id, Side::Left)
    }

    /// Right rotation: the left child rises.
    pub(crate) fn rotate_right(&mut self, id: NodeId) -> NodeId {
        self.rotate(id, Side::Right)
    }

    /// Points `parent`'s link on `side` at `child`, fixing the child's parent link.
    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.arena[parent].child_mut(side) = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    /// Puts `child` at `position`, the root position when that is `None`.
    fn link(&mut self, position: Option<(NodeId, Side)>, child: Option<NodeId>) {
        match position {
            Some((parent, side)) => self.set_child(parent, side, child),
            None => {
                self.root = child;
                if let Some(child) = child {
                    self.arena[child].parent = None;
                }
            }
        }
    }

    /// Follows links on `side` from `id` as far as they go.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn meta(&self, id: NodeId) -> B::Meta {
        self.arena[id].meta
    }

    pub(crate) fn set_meta(&mut self, id: NodeId, meta: B::Meta) {
        self.arena[id].meta = meta;
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent
    }

    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.arena[id].child(side)
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].right
    }

    /// Which link of which parent `child` hangs from.
    pub(crate) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.arena[parent].right, Some(child));
            Side::Right
        }
    }

    /// The parent of `id` and the side it hangs from. `None` for the root.
    pub(crate) fn position(&self, id: NodeId) -> Option<(NodeId, Side)> {
        self.parent(id).map(|parent| (parent, self.side_of(parent, id)))
    }
}
