//! Error type shared by every container in the crate.

use thiserror::Error;

/// Failure conditions reported by container operations.
///
/// Nothing is retried internally; every variant propagates straight to the
/// caller of the operation that hit it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// Indexed access past the live element count.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of live elements at the time of access
        len: usize,
    },

    /// A position was stepped or dereferenced beyond the ends of its container.
    #[error("position is outside the live range of the container")]
    PositionOutOfRange,

    /// `pop`/`front`/`back` on a container with no elements.
    #[error("container is empty")]
    Empty,

    /// Keyed lookup for a key that is not stored.
    #[error("key not found")]
    KeyNotFound,

    /// The element a position referred to has been removed.
    #[error("position refers to an element that no longer exists")]
    Expired,

    /// The position was issued by a different container.
    #[error("position belongs to a different container")]
    ForeignPosition,

    /// A buffer could not be allocated.
    #[error("allocation of {capacity} slots failed")]
    AllocationFailed {
        /// Requested capacity in elements
        capacity: usize,
    },
}

impl ContainerError {
    /// Create an index out of range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// True for both the indexed and positional out-of-range variants.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::PositionOutOfRange
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ContainerError> = core::result::Result<T, E>;
