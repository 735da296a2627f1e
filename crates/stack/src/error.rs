use std::collections::TryReserveError;

use thiserror::Error;

/// Result alias using an [`Error`] as the error type by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised by a [`BoundedStack`](crate::BoundedStack) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// More elements were offered than the stack has room for.
    ///
    /// A rejected push leaves the stack unchanged, a rejected load leaves it
    /// empty.
    #[error("stack overflow: {requested} elements requested but capacity is {capacity}")]
    CapacityExceeded { capacity: usize, requested: usize },
    /// An element was taken from an empty stack.
    #[error("stack underflow: the stack is empty")]
    EmptyAccess,
    /// Storage for the stack could not be allocated.
    #[error("failed to allocate stack storage: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl Error {
    #[inline]
    pub(crate) fn capacity_exceeded(capacity: usize, requested: usize) -> Self {
        Self::CapacityExceeded {
            capacity,
            requested,
        }
    }
}
