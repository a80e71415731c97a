//! Length-prefixed frame layout for the terrawire packet codec.
//!
//! Every packet on the wire is `u16 total_len | u8 kind | body`, little-endian,
//! where `total_len` counts the three header bytes. This crate splits buffers
//! into frames, validates the length prefix, and back-patches it on encode. It
//! does not know what any body contains.
//!
//! # Design Principles
//!
//! - **Bounded decoding** - The length prefix is validated before the body is touched.
//! - **Zero copy** - Decoded frames borrow their body from the input buffer.
//! - **No domain knowledge** - Body layouts live in the codec crate.

mod error;
mod frame;
mod header;
mod limits;

pub use error::{DecodeError, EncodeError, WireResult};
pub use frame::{
    begin_frame, decode_frame, decode_header, encode_frame, finish_frame, FrameIter, FrameMark,
    RawFrame,
};
pub use header::{FrameHeader, PacketKind, FRAME_HEADER_SIZE};
pub use limits::Limits;
