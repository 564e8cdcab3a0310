//! Errors surfaced by the trees.
//!
//! Inserting a value that is already present and removing a value that is absent are not errors.
//! Those are no-ops and are reported through the `bool`/`Option` returned by
//! [`Tree::insert`][crate::Tree::insert] and [`Tree::remove`][crate::Tree::remove].

use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can go wrong when using a [`Tree`][crate::Tree].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has no elements, so there is no minimum or maximum to return.
    #[error("the tree is empty")]
    EmptyTree,

    /// Storage for a new node could not be allocated. The tree is left exactly as it was before
    /// the call.
    #[error("could not allocate a tree node: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

/// `Result` defaulting to [`TreeError`].
pub type Result<T, E = TreeError> = std::result::Result<T, E>;
