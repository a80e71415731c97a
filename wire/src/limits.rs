//! Configurable limits for bounded frame decoding.

/// Wire-level limits for frame decoding.
///
/// The length prefix is attacker-controlled; these limits are checked before
/// any body bytes are handed to a codec. Body parsing limits belong to the
/// codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total frame size in bytes, including the 3-byte header.
    pub max_frame_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // The length prefix is a u16.
            max_frame_bytes: u16::MAX as usize,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions beyond the u16 length prefix.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_cover_u16_prefix() {
        let limits = Limits::default();
        assert_eq!(limits.max_frame_bytes, 65_535);
    }

    #[test]
    fn testing_limits_smaller() {
        assert!(Limits::for_testing().max_frame_bytes < Limits::default().max_frame_bytes);
    }

    #[test]
    fn unlimited_limits() {
        assert_eq!(Limits::unlimited().max_frame_bytes, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_frame_bytes, 4096);
    }
}
