//! Error type shared by every matrix operation.

use thiserror::Error;

/// Errors returned by matrix and transpose-view operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A row, column or sub-bit index lies outside the matrix, or a row
    /// buffer does not have exactly `words_per_row` words.
    #[error("requested cell is outside the matrix bounds")]
    OutOfBounds,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatrixError>;
