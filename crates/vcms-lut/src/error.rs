//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Bad signature, unsupported version, or malformed structure.
    #[error("format error: {0}")]
    Format(String),

    /// Declared size does not match the data that is present.
    ///
    /// Counted in bytes for files and in `u16` values for in-memory grids.
    #[error("size mismatch: expected {expected}, found {actual}")]
    Size {
        /// Size implied by the header or the grid resolution
        expected: u64,
        /// Size actually present
        actual: u64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
