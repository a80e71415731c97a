//! Bounded little-endian byte cursor for the terrawire packet codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for position-tracked
//! reads and writes over caller-owned buffers. Every packet body in the codec
//! is read and written through these two types.
//!
//! # Design Principles
//!
//! - **No unsafe code** - No unaligned pointer reads; bytes are copied out explicitly.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No allocation** - The writer fills a caller-provided slice.
//! - **Fixed byte order** - Little-endian on every host.
//!
//! # Example
//!
//! ```
//! use cursor::{ByteReader, ByteWriter};
//!
//! let mut buf = [0u8; 8];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_u16(0xBEEF).unwrap();
//! writer.write_i32(-7).unwrap();
//! let len = writer.finish();
//!
//! let mut reader = ByteReader::new(&buf[..len]);
//! assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
//! assert_eq!(reader.read_i32().unwrap(), -7);
//! assert!(reader.is_empty());
//! ```

mod error;
mod reader;
mod writer;

pub use error::{CursorError, CursorResult};
pub use reader::ByteReader;
pub use writer::{var_u32_len, ByteWriter};
