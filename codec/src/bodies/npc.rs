//! NPC buff list body.

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use super::PacketBody;
use crate::context::CodecContext;
use crate::error::CodecResult;

/// Number of buff slots carried for each NPC.
pub const NPC_BUFF_SLOTS: usize = 5;

/// One NPC buff slot: `u16 type | i16 time` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcBuff {
    /// Buff type id; `0` is an empty slot.
    pub buff_type: u16,
    /// Remaining time in ticks.
    pub ticks: i16,
}

impl NpcBuff {
    pub const WIRE_SIZE: usize = 4;

    #[must_use]
    pub const fn new(buff_type: u16, ticks: i16) -> Self {
        Self { buff_type, ticks }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.buff_type == 0
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            buff_type: reader.read_u16()?,
            ticks: reader.read_i16()?,
        })
    }

    fn write(self, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        writer.write_u16(self.buff_type)?;
        writer.write_i16(self.ticks)?;
        Ok(())
    }
}

/// The full buff list of one NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcBuffs {
    pub npc_index: u16,
    pub buffs: [NpcBuff; NPC_BUFF_SLOTS],
}

impl PacketBody for NpcBuffs {
    const KIND: PacketKind = PacketKind::NPC_BUFFS;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        let npc_index = reader.read_u16()?;
        let mut buffs = [NpcBuff::default(); NPC_BUFF_SLOTS];
        for buff in &mut buffs {
            *buff = NpcBuff::read(reader)?;
        }
        Ok(Self { npc_index, buffs })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_u16(self.npc_index)?;
        for buff in self.buffs {
            buff.write(writer)?;
        }
        Ok(())
    }
}
