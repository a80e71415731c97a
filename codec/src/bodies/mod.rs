//! Fixed-layout and flag-gated packet bodies.
//!
//! Each body type knows its [`PacketKind`] and reads or writes itself from a
//! cursor positioned just after the frame header.

mod item;
mod npc;
mod player;
mod world;

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use crate::context::CodecContext;
use crate::error::{CodecError, CodecResult, FieldKind, LimitKind};

pub use item::{AlterItem, ItemOverrides, RemoveItemOwner, Rgba};
pub use npc::{NpcBuff, NpcBuffs, NPC_BUFF_SLOTS};
pub use player::{PlayerConnect, PlayerTeleportItem, TeleportItem};
pub use world::{
    AmbientEffect, AmbientEffectType, AnglerQuest, EnterWorld, OldOnesArmyInfo, RequestSign,
    TICKS_PER_SECOND,
};

/// A packet body with a known kind and wire layout.
pub trait PacketBody: Sized {
    /// The frame kind this body is carried under.
    const KIND: PacketKind;

    /// Reads the body. Bytes left in `reader` afterwards are not an error.
    fn read_body(reader: &mut ByteReader<'_>, ctx: &CodecContext<'_>) -> CodecResult<Self>;

    /// Writes the body.
    fn write_body(&self, writer: &mut ByteWriter<'_>, ctx: &CodecContext<'_>) -> CodecResult<()>;
}

/// A one-byte presence bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Flags8(u8);

impl Flags8 {
    pub(crate) const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u8 {
        self.0
    }

    pub(crate) const fn get(self, bit: u8) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub(crate) fn set(&mut self, bit: u8, value: bool) {
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }
}

/// Reads a 7-bit length-prefixed UTF-8 string.
pub(crate) fn read_string(reader: &mut ByteReader<'_>, ctx: &CodecContext<'_>) -> CodecResult<String> {
    let len = reader.read_var_u32()? as usize;
    if len > ctx.limits.max_string_bytes {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::StringBytes,
            limit: ctx.limits.max_string_bytes,
            actual: len,
        });
    }
    let bytes = reader.read_bytes(len)?;
    let text = std::str::from_utf8(bytes).map_err(|err| CodecError::InvalidField {
        field: FieldKind::Utf8String,
        value: err.valid_up_to() as u64,
    })?;
    Ok(text.to_owned())
}

/// Writes a 7-bit length-prefixed UTF-8 string.
pub(crate) fn write_string(writer: &mut ByteWriter<'_>, text: &str) -> CodecResult<()> {
    let len = u32::try_from(text.len()).map_err(|_| CodecError::LengthOverflow {
        length: text.len(),
    })?;
    let needed = cursor::var_u32_len(len) + text.len();
    if writer.remaining() < needed {
        return Err(CodecError::BufferTooSmall {
            needed,
            available: writer.remaining(),
        });
    }
    writer.write_var_u32(len)?;
    writer.write_bytes(text.as_bytes())?;
    Ok(())
}
