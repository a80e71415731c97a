//! Error types for codec operations.

use std::fmt;

use cursor::CursorError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding packet bodies.
///
/// Every error is scoped to one frame; callers decide whether to drop the
/// frame or the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Frame header error.
    Wire(wire::DecodeError),

    /// A read or write ran past the end of the available bytes.
    BufferTooSmall { needed: usize, available: usize },

    /// Declared lengths are inconsistent with the bytes present.
    InvalidFraming(FramingReason),

    /// A decoded or supplied value lies outside its legal domain.
    InvalidField { field: FieldKind, value: u64 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A tile slice was constructed with unequal width and height.
    NotSquare { width: usize, height: usize },

    /// The encoded frame does not fit the u16 length prefix.
    LengthOverflow { length: usize },
}

/// Details for framing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingReason {
    /// A tile square declares more tiles than the remaining body could hold.
    TileSquareTooLarge { size: u16, remaining: usize },
    /// A 7-bit encoded length did not terminate.
    InvalidVarint,
}

/// Fields whose values are validated during encoding or decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    BlockColor,
    WallColor,
    WallId,
    LiquidAmount,
    LiquidType,
    TileFrame,
    ChangeType,
    TeleportItem,
    Utf8String,
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    TileSquareSize,
    StringBytes,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::InvalidFraming(reason) => write!(f, "invalid framing: {reason}"),
            Self::InvalidField { field, value } => {
                write!(f, "invalid {field} value {value}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::NotSquare { width, height } => {
                write!(f, "tile slice is not square: {width}x{height}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "frame length {length} does not fit the u16 prefix")
            }
        }
    }
}

impl fmt::Display for FramingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileSquareTooLarge { size, remaining } => write!(
                f,
                "tile square of size {size} cannot fit in {remaining} remaining bytes"
            ),
            Self::InvalidVarint => write!(f, "unterminated 7-bit length"),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlockColor => "block color",
            Self::WallColor => "wall color",
            Self::WallId => "wall id",
            Self::LiquidAmount => "liquid amount",
            Self::LiquidType => "liquid type",
            Self::TileFrame => "tile frame",
            Self::ChangeType => "change type",
            Self::TeleportItem => "teleport item",
            Self::Utf8String => "utf-8 string",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TileSquareSize => "tile square size",
            Self::StringBytes => "string bytes",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        match err {
            wire::EncodeError::BufferTooSmall { needed, available } => {
                Self::BufferTooSmall { needed, available }
            }
            wire::EncodeError::LengthOverflow { length } => Self::LengthOverflow { length },
            wire::EncodeError::Cursor(err) => err.into(),
        }
    }
}

impl From<CursorError> for CodecError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::BufferTooSmall {
                requested,
                available,
            } => Self::BufferTooSmall {
                needed: requested,
                available,
            },
            CursorError::InvalidVarint => Self::InvalidFraming(FramingReason::InvalidVarint),
        }
    }
}
