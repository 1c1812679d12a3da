use thiserror::Error;

/// Errors from reading or writing grid files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file is missing, unreadable, or unwritable.
    #[error("grid file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not decode to a grid.
    #[error("corrupt grid file: {0}")]
    Corrupt(String),
}
