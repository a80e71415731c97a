//! Frame decoding, splitting and length back-patching.

use cursor::{ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, WireResult};
use crate::header::{FrameHeader, PacketKind, FRAME_HEADER_SIZE};
use crate::limits::Limits;

/// A frame split into its header and borrowed body bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    pub header: FrameHeader,
    pub body: &'a [u8],
}

impl RawFrame<'_> {
    /// Returns the frame's kind byte.
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        self.header.kind
    }

    /// Returns the total frame length, header included.
    #[must_use]
    pub const fn total_len(&self) -> usize {
        self.header.total_len as usize
    }
}

/// Decodes and validates a frame header from the start of `buf`.
///
/// Only the header is checked against `buf`; use [`decode_frame`] to also
/// check that the declared body is present.
pub fn decode_header(buf: &[u8], limits: &Limits) -> WireResult<FrameHeader> {
    let mut reader = ByteReader::new(buf);
    let (Ok(total_len), Ok(kind)) = (reader.read_u16(), reader.read_u8()) else {
        return Err(DecodeError::Truncated {
            needed: FRAME_HEADER_SIZE,
            available: buf.len(),
        });
    };
    if usize::from(total_len) < FRAME_HEADER_SIZE {
        return Err(DecodeError::InvalidLength {
            declared: total_len,
        });
    }
    if usize::from(total_len) > limits.max_frame_bytes {
        return Err(DecodeError::FrameTooLarge {
            limit: limits.max_frame_bytes,
            actual: usize::from(total_len),
        });
    }
    Ok(FrameHeader {
        total_len,
        kind: PacketKind::from_raw(kind),
    })
}

/// Decodes one frame from the start of `buf`.
///
/// Bytes after the declared length belong to the next frame and are not
/// included in the returned body.
pub fn decode_frame<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<RawFrame<'a>> {
    let header = decode_header(buf, limits)?;
    let total = usize::from(header.total_len);
    if buf.len() < total {
        tracing::debug!(
            kind = header.kind.raw(),
            declared = total,
            available = buf.len(),
            "rejecting truncated frame"
        );
        return Err(DecodeError::Truncated {
            needed: total,
            available: buf.len(),
        });
    }
    Ok(RawFrame {
        header,
        body: &buf[FRAME_HEADER_SIZE..total],
    })
}

/// Iterates over back-to-back frames in a buffer.
///
/// Yields `(offset, frame)` pairs. After the first error the iterator is fused
/// and yields nothing further, since the following frame boundary is unknown.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    buf: &'a [u8],
    offset: usize,
    limits: Limits,
    failed: bool,
}

impl<'a> FrameIter<'a> {
    /// Creates an iterator over all frames in `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8], limits: &Limits) -> Self {
        Self {
            buf,
            offset: 0,
            limits: limits.clone(),
            failed: false,
        }
    }

    /// Returns the offset of the next unread frame.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = WireResult<(usize, RawFrame<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }
        match decode_frame(&self.buf[self.offset..], &self.limits) {
            Ok(frame) => {
                let offset = self.offset;
                self.offset += frame.total_len();
                Some(Ok((offset, frame)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Marks an open frame whose length prefix still needs patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an open frame must be closed with `finish_frame`"]
pub struct FrameMark {
    start: usize,
    kind: PacketKind,
}

impl FrameMark {
    /// Returns the kind written into the frame.
    pub const fn kind(self) -> PacketKind {
        self.kind
    }
}

/// Writes a placeholder length and the kind byte, opening a frame.
pub fn begin_frame(writer: &mut ByteWriter<'_>, kind: PacketKind) -> Result<FrameMark, EncodeError> {
    if writer.remaining() < FRAME_HEADER_SIZE {
        return Err(EncodeError::BufferTooSmall {
            needed: FRAME_HEADER_SIZE,
            available: writer.remaining(),
        });
    }
    let start = writer.position();
    writer.write_u16(0)?;
    writer.write_u8(kind.raw())?;
    Ok(FrameMark { start, kind })
}

/// Patches the length prefix of an open frame and returns its total length.
pub fn finish_frame(writer: &mut ByteWriter<'_>, mark: FrameMark) -> Result<usize, EncodeError> {
    let total = writer.position() - mark.start;
    let total_len =
        u16::try_from(total).map_err(|_| EncodeError::LengthOverflow { length: total })?;
    writer.patch_u16(mark.start, total_len)?;
    Ok(total)
}

/// Encodes a complete frame around an already-serialized body.
pub fn encode_frame(kind: PacketKind, body: &[u8], out: &mut [u8]) -> Result<usize, EncodeError> {
    let header = FrameHeader::for_body(kind, body.len()).ok_or(EncodeError::LengthOverflow {
        length: body.len().saturating_add(FRAME_HEADER_SIZE),
    })?;
    let needed = usize::from(header.total_len);
    if out.len() < needed {
        return Err(EncodeError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }
    let mut writer = ByteWriter::new(out);
    writer.write_u16(header.total_len)?;
    writer.write_u8(kind.raw())?;
    writer.write_bytes(body)?;
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_teleport_item_frame() {
        let bytes = [4u8, 0, 73, 2];
        let frame = decode_frame(&bytes, &Limits::default()).unwrap();
        assert_eq!(frame.kind(), PacketKind::PLAYER_TELEPORT_ITEM);
        assert_eq!(frame.total_len(), 4);
        assert_eq!(frame.body, &[2]);
    }

    #[test]
    fn decode_empty_body_frame() {
        let bytes = [3u8, 0, 49];
        let frame = decode_frame(&bytes, &Limits::default()).unwrap();
        assert_eq!(frame.kind(), PacketKind::ENTER_WORLD);
        assert!(frame.body.is_empty());
    }

    #[test]
    fn decode_rejects_short_header() {
        let err = decode_frame(&[4, 0], &Limits::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let err = decode_frame(&[7, 0, 46, 0, 1], &Limits::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 7,
                available: 5
            }
        );
    }

    #[test]
    fn decode_rejects_length_below_header() {
        let err = decode_frame(&[2, 0, 49], &Limits::default()).unwrap_err();
        assert_eq!(err, DecodeError::InvalidLength { declared: 2 });
    }

    #[test]
    fn decode_enforces_limits() {
        let mut bytes = vec![0u8; 300];
        bytes[0..2].copy_from_slice(&300u16.to_le_bytes());
        bytes[2] = 20;
        let limits = Limits {
            max_frame_bytes: 64,
        };
        let err = decode_frame(&bytes, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::FrameTooLarge { limit: 64, actual: 300 }));
    }

    #[test]
    fn decode_ignores_following_bytes() {
        let bytes = [4u8, 0, 73, 2, 3, 0, 49];
        let frame = decode_frame(&bytes, &Limits::default()).unwrap();
        assert_eq!(frame.body, &[2]);
    }

    #[test]
    fn iter_splits_frames() {
        let bytes = [4u8, 0, 73, 2, 3, 0, 49, 5, 0, 39, 1, 0];
        let frames: Vec<_> = FrameIter::new(&bytes, &Limits::default())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].0, 0);
        assert_eq!(frames[1].0, 4);
        assert_eq!(frames[2].0, 7);
        assert_eq!(frames[2].1.kind(), PacketKind::REMOVE_ITEM_OWNER);
    }

    #[test]
    fn iter_stops_after_error() {
        let bytes = [4u8, 0, 73, 2, 9, 0, 49];
        let mut iter = FrameIter::new(&bytes, &Limits::default());
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
        assert_eq!(iter.offset(), 4);
    }

    #[test]
    fn begin_finish_patches_length() {
        let mut buf = [0u8; 16];
        let mut writer = ByteWriter::new(&mut buf);
        let mark = begin_frame(&mut writer, PacketKind::REQUEST_SIGN).unwrap();
        writer.write_i16(256).unwrap();
        writer.write_i16(100).unwrap();
        let total = finish_frame(&mut writer, mark).unwrap();
        assert_eq!(total, 7);
        assert_eq!(writer.written(), &[7, 0, 46, 0, 1, 100, 0]);
    }

    #[test]
    fn begin_frame_needs_header_room() {
        let mut buf = [0u8; 2];
        let mut writer = ByteWriter::new(&mut buf);
        let err = begin_frame(&mut writer, PacketKind::ENTER_WORLD).unwrap_err();
        assert!(matches!(err, EncodeError::BufferTooSmall { needed: 3, .. }));
    }

    #[test]
    fn finish_frame_rejects_overflow() {
        let mut buf = vec![0u8; 70_000];
        let mut writer = ByteWriter::new(&mut buf);
        let mark = begin_frame(&mut writer, PacketKind::TILE_SQUARE).unwrap();
        writer.write_bytes(&[0u8; 65_533]).unwrap();
        let err = finish_frame(&mut writer, mark).unwrap_err();
        assert_eq!(err, EncodeError::LengthOverflow { length: 65_536 });
    }

    #[test]
    fn encode_frame_wraps_body() {
        let mut out = [0u8; 8];
        let len = encode_frame(PacketKind::from_raw(250), &[9, 8, 7], &mut out).unwrap();
        assert_eq!(&out[..len], &[6, 0, 250, 9, 8, 7]);
    }

    #[test]
    fn encode_frame_buffer_too_small() {
        let mut out = [0u8; 4];
        let err = encode_frame(PacketKind::ENTER_WORLD, &[1, 2], &mut out).unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferTooSmall {
                needed: 5,
                available: 4
            }
        );
    }
}
