//! Decoded packets paired with the frame bytes they came from.
//!
//! Forwarding an untouched packet copies the original frame; only packets
//! that were handed out mutably or explicitly marked are re-encoded.

use wire::decode_frame;

use crate::context::CodecContext;
use crate::error::{CodecError, CodecResult};
use crate::packet::{decode_body, encode_packet, Packet};

/// A packet plus the original bytes of its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketEnvelope {
    packet: Packet<'static>,
    raw: Vec<u8>,
    dirty: bool,
}

/// Decodes the first frame in `buf` and keeps a copy of its bytes.
pub fn decode_envelope(buf: &[u8], ctx: &CodecContext<'_>) -> CodecResult<PacketEnvelope> {
    let frame = decode_frame(buf, &ctx.wire_limits)?;
    let packet = decode_body(frame, ctx)?.into_owned();
    Ok(PacketEnvelope {
        packet,
        raw: buf[..frame.total_len()].to_vec(),
        dirty: false,
    })
}

impl PacketEnvelope {
    /// Wraps a packet that has no original bytes. It is always re-encoded.
    #[must_use]
    pub fn new(packet: Packet<'static>) -> Self {
        Self {
            packet,
            raw: Vec::new(),
            dirty: true,
        }
    }

    #[must_use]
    pub const fn packet(&self) -> &Packet<'static> {
        &self.packet
    }

    /// Returns the packet for modification and marks the envelope changed.
    pub fn packet_mut(&mut self) -> &mut Packet<'static> {
        self.dirty = true;
        &mut self.packet
    }

    /// Forces the next write to re-encode the packet.
    pub fn mark_changed(&mut self) {
        self.dirty = true;
    }

    /// Returns `true` if the packet must be re-encoded before sending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the original frame bytes. Empty for envelopes built with [`Self::new`].
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    #[must_use]
    pub fn into_packet(self) -> Packet<'static> {
        self.packet
    }

    /// Writes the frame into `out` and returns its length.
    ///
    /// While clean, the original bytes are copied verbatim.
    pub fn write_to(&self, ctx: &CodecContext<'_>, out: &mut [u8]) -> CodecResult<usize> {
        if self.dirty {
            return encode_packet(&self.packet, ctx, out);
        }
        let len = self.raw.len();
        if out.len() < len {
            return Err(CodecError::BufferTooSmall {
                needed: len,
                available: out.len(),
            });
        }
        out[..len].copy_from_slice(&self.raw);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{AnglerQuest, RequestSign};

    #[test]
    fn clean_envelope_forwards_raw_bytes() {
        let ctx = CodecContext::default();
        // Trailing padding survives because the raw frame is forwarded.
        let bytes = [6, 0, 74, 1, 1, 0xEE, 3, 0, 49];
        let envelope = decode_envelope(&bytes, &ctx).unwrap();
        assert!(!envelope.is_dirty());
        assert_eq!(envelope.raw(), &bytes[..6]);

        let mut out = [0u8; 16];
        let len = envelope.write_to(&ctx, &mut out).unwrap();
        assert_eq!(&out[..len], &bytes[..6]);
    }

    #[test]
    fn mutation_marks_dirty_and_reencodes() {
        let ctx = CodecContext::default();
        let mut envelope = decode_envelope(&[7, 0, 46, 0, 1, 100, 0], &ctx).unwrap();
        if let Packet::RequestSign(sign) = envelope.packet_mut() {
            sign.y = 101;
        }
        assert!(envelope.is_dirty());

        let mut out = [0u8; 16];
        let len = envelope.write_to(&ctx, &mut out).unwrap();
        assert_eq!(&out[..len], &[7, 0, 46, 0, 1, 101, 0]);
        assert_eq!(
            envelope.into_packet(),
            Packet::RequestSign(RequestSign { x: 256, y: 101 })
        );
    }

    #[test]
    fn mark_changed_drops_padding() {
        let ctx = CodecContext::default();
        let mut envelope = decode_envelope(&[6, 0, 74, 1, 1, 0xEE], &ctx).unwrap();
        envelope.mark_changed();
        let mut out = [0u8; 16];
        let len = envelope.write_to(&ctx, &mut out).unwrap();
        assert_eq!(&out[..len], &[5, 0, 74, 1, 1]);
    }

    #[test]
    fn new_envelope_is_dirty() {
        let ctx = CodecContext::default();
        let envelope = PacketEnvelope::new(AnglerQuest { quest: 2, finished: false }.into());
        assert!(envelope.is_dirty());
        assert!(envelope.raw().is_empty());
        let mut out = [0u8; 8];
        let len = envelope.write_to(&ctx, &mut out).unwrap();
        assert_eq!(&out[..len], &[5, 0, 74, 2, 0]);
    }

    #[test]
    fn clean_write_checks_room() {
        let ctx = CodecContext::default();
        let envelope = decode_envelope(&[3, 0, 49], &ctx).unwrap();
        let mut out = [0u8; 2];
        assert_eq!(
            envelope.write_to(&ctx, &mut out).unwrap_err(),
            CodecError::BufferTooSmall {
                needed: 3,
                available: 2
            }
        );
    }
}
