//! Byte-level reader with bounded operations.

use crate::error::{CursorError, CursorResult};

/// A position-tracked reader over a borrowed byte slice.
///
/// All multi-byte values are little-endian regardless of host byte order.
/// Every read is bounds-checked; the reader never panics on malformed input
/// and never advances past a failed read.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail of the buffer without advancing.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a single signed byte.
    pub fn read_i8(&mut self) -> CursorResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a one-byte boolean; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> CursorResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a `u16` (little-endian).
    pub fn read_u16(&mut self) -> CursorResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads an `i16` (little-endian).
    pub fn read_i16(&mut self) -> CursorResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a `u32` (little-endian).
    pub fn read_u32(&mut self) -> CursorResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads an `i32` (little-endian).
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads an IEEE-754 `f32` (little-endian).
    pub fn read_f32(&mut self) -> CursorResult<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a 7-bit encoded unsigned integer (at most five bytes).
    pub fn read_var_u32(&mut self) -> CursorResult<u32> {
        let start = self.pos;
        let mut result = 0u32;
        for shift in (0..35).step_by(7) {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(err) => {
                    self.pos = start;
                    return Err(err);
                }
            };
            // The fifth byte holds only the top four bits.
            if shift == 28 && byte > 0x0F {
                break;
            }
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        self.pos = start;
        Err(CursorError::InvalidVarint)
    }

    /// Reads exactly `len` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> CursorResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Advances past `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> CursorResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    fn ensure(&self, len: usize) -> CursorResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CursorError::BufferTooSmall {
                requested: len,
                available,
            });
        }
        Ok(())
    }
}
