//! Per-call decoding and encoding configuration.

use std::fmt;

use crate::frames::{BlockFrames, FrameLookup};
use crate::limits::CodecLimits;

/// Everything a body codec consults besides the bytes themselves.
#[derive(Clone)]
pub struct CodecContext<'a> {
    /// Limits checked while splitting frames.
    pub wire_limits: wire::Limits,
    /// Limits checked while parsing bodies.
    pub limits: CodecLimits,
    /// Which block ids carry frame coordinates.
    pub frames: &'a dyn FrameLookup,
}

impl<'a> CodecContext<'a> {
    /// Creates a context with default limits and the given frame lookup.
    #[must_use]
    pub fn new(frames: &'a dyn FrameLookup) -> Self {
        Self {
            wire_limits: wire::Limits::default(),
            limits: CodecLimits::default(),
            frames,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, wire_limits: wire::Limits, limits: CodecLimits) -> Self {
        self.wire_limits = wire_limits;
        self.limits = limits;
        self
    }
}

impl CodecContext<'static> {
    /// Creates a context with small limits and the bundled frame table.
    #[must_use]
    pub fn for_testing() -> Self {
        Self::new(BlockFrames::builtin())
            .with_limits(wire::Limits::for_testing(), CodecLimits::for_testing())
    }
}

impl Default for CodecContext<'static> {
    fn default() -> Self {
        Self::new(BlockFrames::builtin())
    }
}

impl fmt::Debug for CodecContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecContext")
            .field("wire_limits", &self.wire_limits)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockId;

    #[test]
    fn default_uses_builtin_frames() {
        let ctx = CodecContext::default();
        assert!(ctx.frames.has_frames(BlockId::new(21)));
        assert_eq!(ctx.limits, CodecLimits::default());
    }

    #[test]
    fn custom_lookup() {
        let none = |_: BlockId| false;
        let ctx = CodecContext::new(&none);
        assert!(!ctx.frames.has_frames(BlockId::new(21)));
    }

    #[test]
    fn testing_limits() {
        let ctx = CodecContext::for_testing();
        assert_eq!(ctx.wire_limits, wire::Limits::for_testing());
        assert_eq!(ctx.limits, CodecLimits::for_testing());
    }
}
