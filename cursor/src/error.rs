//! Error types for cursor operations.

use std::fmt;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading or writing through a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// A read or write would run past the end of the buffer.
    BufferTooSmall {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A 7-bit encoded integer ran past five bytes or overflowed a u32.
    InvalidVarint,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall {
                requested,
                available,
            } => {
                write!(
                    f,
                    "buffer too small: requested {requested} bytes but only {available} available"
                )
            }
            Self::InvalidVarint => write!(f, "7-bit encoded integer does not fit in a u32"),
        }
    }
}

impl std::error::Error for CursorError {}
