//! Error type shared by slots and grids.

/// Recoverable failures of slot and grid operations.
///
/// Precondition violations of the pure geometry functions ([`fit`](crate::fit()),
/// [`mask::make`](crate::mask::make)) are not represented here; those panic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollageError {
    /// Grid shape or slot geometry is unusable.
    #[error("invalid collage configuration: {reason}")]
    Configuration {
        /// What was wrong.
        reason: &'static str,
    },
    /// Slot coordinates outside the grid.
    #[error("slot ({row}, {col}) is outside a {rows}x{cols} grid")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// The slot or grid was already destroyed.
    #[error("{what} used after destroy")]
    UseAfterDestroy {
        /// `"slot"` or `"grid"`.
        what: &'static str,
    },
}

/// Result alias for slot and grid operations.
pub type Result<T, E = CollageError> = core::result::Result<T, E>;
