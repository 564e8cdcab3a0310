//! Node storage shared by every tree.
//!
//! Nodes live in the slots of a single growable vector and refer to each other through
//! [`NodeId`] handles rather than pointers. Child links model ownership, the parent link is a
//! plain back-reference used to walk up the tree while repairing invariants. Vacant slots are
//! threaded into an intrusive free list, so freeing a node never allocates and the next insert
//! reuses the slot. Dropping the arena drops every node at once.

use std::collections::TryReserveError;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use log::debug;

/// Handle to a node stored in an [`Arena`]. It stays valid until that node is freed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The smaller-values side.
    Left,
    /// The larger-values side.
    Right,
}

impl Side {
    /// The mirrored side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A stored element with its links and the balancing strategy's metadata `M` (a height or a
/// color).
#[derive(Clone, Debug)]
pub(crate) struct Node<T, M> {
    pub(crate) value: T,
    pub(crate) meta: M,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T, M> Node<T, M> {
    pub(crate) fn leaf(value: T, meta: M, parent: Option<NodeId>) -> Self {
        Self {
            value,
            meta,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot<T, M> {
    Occupied(Node<T, M>),
    /// Link to the next vacant slot.
    Vacant(Option<NodeId>),
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T, M> {
    slots: Vec<Slot<T, M>>,
    free: Option<NodeId>,
    len: usize,
}

impl<T, M> Arena<T, M> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Makes sure the next [`Arena::alloc`] will not need to allocate.
    pub(crate) fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if self.free.is_some() {
            return Ok(());
        }
        self.slots.try_reserve(1)
    }

    pub(crate) fn alloc(&mut self, node: Node<T, M>) -> NodeId {
        self.len += 1;
        match self.free {
            Some(id) => {
                match mem::replace(&mut self.slots[id.0], Slot::Occupied(node)) {
                    Slot::Vacant(next) => self.free = next,
                    Slot::Occupied(_) => unreachable!("free list pointed at live node {:?}", id),
                }
                id
            }
            None => {
                if self.slots.len() == self.slots.capacity() {
                    debug!("growing node arena past {} slots", self.slots.len());
                }
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Removes the node from the arena and hands it back. Its slot joins the free list.
    ///
    /// ## Panics
    ///
    /// When `id` was already freed.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<T, M> {
        match mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free)) {
            Slot::Occupied(node) => {
                self.free = Some(id);
                self.len -= 1;
                node
            }
            Slot::Vacant(_) => panic!("node {:?} freed twice", id),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    /// Consumes the arena, yielding every slot's value indexed by [`NodeId::index`].
    pub(crate) fn into_values(self) -> Vec<Option<T>> {
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Occupied(node) => Some(node.value),
                Slot::Vacant(_) => None,
            })
            .collect()
    }
}

impl<T, M> Index<NodeId> for Arena<T, M> {
    type Output = Node<T, M>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node handle {:?}", id),
        }
    }
}

impl<T, M> IndexMut<NodeId> for Arena<T, M> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node handle {:?}", id),
        }
    }
}
