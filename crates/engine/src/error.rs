use thiserror::Error;

/// Errors from legend lookups and cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The legend has no entry under this short key.
    #[error("no legend entry for key {key:?}")]
    KeyNotFound { key: String },

    /// Cell coordinates outside the grid's declared dimensions.
    #[error("cell ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
