//! Limits for codec-level decoding.

/// Codec-specific limits enforced while decoding packet bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecLimits {
    /// Maximum side length of a tile square.
    pub max_tile_square_size: u16,
    /// Maximum byte length of a length-prefixed string.
    pub max_string_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_tile_square_size: 255,
            max_string_bytes: 512,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_tile_square_size: 32,
            max_string_bytes: 64,
        }
    }

    /// Creates limits bounded only by the wire format itself.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_tile_square_size: i16::MAX as u16,
            max_string_bytes: usize::MAX,
        }
    }
}
