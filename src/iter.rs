//! In-order iteration. The walk keeps an explicit stack of the nodes whose left subtrees are
//! being visited, so its depth is bounded by the tree height rather than the call stack.

use std::iter::FusedIterator;
use std::vec;

use crate::arena::{Arena, NodeId};
use crate::balance::Balance;
use crate::tree::Tree;

/// In-order cursor over node handles.
#[derive(Clone, Debug)]
pub(crate) struct Walk {
    stack: Vec<NodeId>,
}

impl Walk {
    pub(crate) fn new<T, M>(arena: &Arena<T, M>, root: Option<NodeId>) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.descend(arena, root);
        walk
    }

    /// Pushes `cursor` and its chain of left children.
    fn descend<T, M>(&mut self, arena: &Arena<T, M>, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = arena[id].left;
        }
    }

    pub(crate) fn next<T, M>(&mut self, arena: &Arena<T, M>) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.descend(arena, arena[id].right);
        Some(id)
    }
}

/// Borrowing iterator over a [`Tree`] in ascending order. Created by [`Tree::iter`].
pub struct Iter<'a, T, B: Balance> {
    tree: &'a Tree<T, B>,
    walk: Walk,
    remaining: usize,
}

impl<'a, T, B: Balance> Iter<'a, T, B> {
    pub(crate) fn new(tree: &'a Tree<T, B>) -> Self {
        Self {
            tree,
            walk: Walk::new(&tree.arena, tree.root),
            remaining: tree.len(),
        }
    }
}

impl<T, B: Balance> Clone for Iter<'_, T, B> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T, B: Balance> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = &self.tree.arena;
        let id = self.walk.next(arena)?;
        self.remaining -= 1;
        Some(&arena[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, B: Balance> ExactSizeIterator for Iter<'_, T, B> {}

impl<T, B: Balance> FusedIterator for Iter<'_, T, B> {}

/// Owning iterator over a [`Tree`] in ascending order. Created by [`Tree::into_iter`].
#[derive(Debug)]
pub struct IntoIter<T> {
    values: Vec<Option<T>>,
    order: vec::IntoIter<NodeId>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<Option<T>>, order: Vec<NodeId>) -> Self {
        Self {
            values,
            order: order.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.next()?;
        self.values[id.index()].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
