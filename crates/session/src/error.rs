//! Unified error type for session operations.
//!
//! Order submission never lets these escape: `OrderService::submit`
//! converts every failure into a plain `{success: false, message}`
//! result at the boundary.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by cart and order operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The storage boundary failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An order was requested from an empty cart.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// A cart index was outside the current cart.
    ///
    /// The original site silently ignored these; we surface them so a
    /// stale UI index is visible instead of a mystery no-op.
    #[error("cart index {index} out of range (cart has {len} items)")]
    IndexOutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// Number of items in the cart at the time.
        len: usize,
    },

    /// Order validation failed; the field errors are accumulated.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
}
