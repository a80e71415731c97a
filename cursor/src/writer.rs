//! Byte-level writer into a caller-provided buffer.

use crate::error::{CursorError, CursorResult};

/// A position-tracked writer over a borrowed, fixed-capacity byte buffer.
///
/// The writer never allocates. Writes that do not fit return
/// [`CursorError::BufferTooSmall`] and leave the buffer and position untouched.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a new `ByteWriter` positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> CursorResult<()> {
        self.write_bytes(&[value])
    }

    /// Writes a single signed byte.
    pub fn write_i8(&mut self, value: i8) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a one-byte boolean (`1` or `0`).
    pub fn write_bool(&mut self, value: bool) -> CursorResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes a `u16` (little-endian).
    pub fn write_u16(&mut self, value: u16) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes an `i16` (little-endian).
    pub fn write_i16(&mut self, value: i16) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a `u32` (little-endian).
    pub fn write_u32(&mut self, value: u32) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes an `i32` (little-endian).
    pub fn write_i32(&mut self, value: i32) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes an IEEE-754 `f32` (little-endian).
    pub fn write_f32(&mut self, value: f32) -> CursorResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a 7-bit encoded unsigned integer.
    pub fn write_var_u32(&mut self, value: u32) -> CursorResult<()> {
        let mut scratch = [0u8; 5];
        let len = encode_var_u32(value, &mut scratch);
        self.write_bytes(&scratch[..len])
    }

    /// Writes a raw span of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CursorResult<()> {
        let available = self.remaining();
        if bytes.len() > available {
            return Err(CursorError::BufferTooSmall {
                requested: bytes.len(),
                available,
            });
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Overwrites a `u16` at an already-written offset without moving the position.
    ///
    /// Used to back-patch length prefixes once the body size is known.
    pub fn patch_u16(&mut self, offset: usize, value: u16) -> CursorResult<()> {
        let end = offset.saturating_add(2);
        if end > self.pos {
            return Err(CursorError::BufferTooSmall {
                requested: 2,
                available: self.pos.saturating_sub(offset),
            });
        }
        self.buf[offset..end].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Finishes writing and returns the number of bytes produced.
    #[must_use]
    pub const fn finish(self) -> usize {
        self.pos
    }
}

/// Returns the number of bytes a 7-bit encoded `value` occupies.
#[must_use]
pub const fn var_u32_len(mut value: u32) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

fn encode_var_u32(mut value: u32, out: &mut [u8; 5]) -> usize {
    let mut offset = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out[offset] = byte;
        offset += 1;
        if value == 0 {
            break;
        }
    }
    offset
}
