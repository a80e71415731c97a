//! Error types for frame operations.

use std::fmt;

use cursor::CursorError;

/// Result type for frame decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that reject a whole frame during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer holds fewer bytes than the header or the declared length needs.
    Truncated { needed: usize, available: usize },

    /// The declared total length is smaller than the frame header itself.
    InvalidLength { declared: u16 },

    /// The declared total length exceeds the configured limit.
    FrameTooLarge { limit: usize, actual: usize },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall { needed: usize, available: usize },
    LengthOverflow { length: usize },
    /// A cursor failure other than running out of room.
    Cursor(CursorError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, available } => {
                write!(f, "truncated frame: need {needed} bytes, have {available}")
            }
            Self::InvalidLength { declared } => {
                write!(f, "declared frame length {declared} is shorter than the header")
            }
            Self::FrameTooLarge { limit, actual } => {
                write!(f, "frame bytes limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "frame length {length} does not fit the u16 prefix")
            }
            Self::Cursor(err) => write!(f, "cursor error: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

impl From<CursorError> for EncodeError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::BufferTooSmall {
                requested,
                available,
            } => Self::BufferTooSmall {
                needed: requested,
                available,
            },
            other @ CursorError::InvalidVarint => Self::Cursor(other),
        }
    }
}
