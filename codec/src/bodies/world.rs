//! World state bodies.

use std::time::Duration;

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use super::PacketBody;
use crate::context::CodecContext;
use crate::error::CodecResult;

/// Game ticks per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Requests the text of the sign at a tile position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RequestSign {
    pub x: i16,
    pub y: i16,
}

impl PacketBody for RequestSign {
    const KIND: PacketKind = PacketKind::REQUEST_SIGN;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        Ok(())
    }
}

/// Signals that the client has finished loading and is entering the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnterWorld;

impl PacketBody for EnterWorld {
    const KIND: PacketKind = PacketKind::ENTER_WORLD;

    fn read_body(_reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self)
    }

    fn write_body(&self, _writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        Ok(())
    }
}

/// The current angler quest and whether the player has finished it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnglerQuest {
    pub quest: u8,
    pub finished: bool,
}

impl PacketBody for AnglerQuest {
    const KIND: PacketKind = PacketKind::ANGLER_QUEST;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            quest: reader.read_u8()?,
            finished: reader.read_bool()?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_u8(self.quest)?;
        writer.write_bool(self.finished)?;
        Ok(())
    }
}

/// The kind of a cosmetic ambient effect.
///
/// Any byte is carried through unchanged; the constants name the known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AmbientEffectType(pub u8);

impl AmbientEffectType {
    pub const TREE_GROW: Self = Self(1);
    pub const FAIRY_PARTICLES: Self = Self(2);
}

/// A cosmetic effect at a world position.
///
/// `u8 type | i32 x | i32 y | u8 height_or_particle | i16 tree_gore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AmbientEffect {
    pub effect: AmbientEffectType,
    pub x: i32,
    pub y: i32,
    /// Tree height for [`AmbientEffectType::TREE_GROW`], particle kind otherwise.
    pub height_or_particle: u8,
    pub tree_gore: i16,
}

impl AmbientEffect {
    pub const WIRE_SIZE: usize = 12;
}

impl PacketBody for AmbientEffect {
    const KIND: PacketKind = PacketKind::AMBIENT_EFFECT;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            effect: AmbientEffectType(reader.read_u8()?),
            x: reader.read_i32()?,
            y: reader.read_i32()?,
            height_or_particle: reader.read_u8()?,
            tree_gore: reader.read_i16()?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_u8(self.effect.0)?;
        writer.write_i32(self.x)?;
        writer.write_i32(self.y)?;
        writer.write_u8(self.height_or_particle)?;
        writer.write_i16(self.tree_gore)?;
        Ok(())
    }
}

/// The delay between Old One's Army waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OldOnesArmyInfo {
    /// Wait time in game ticks.
    pub wait_ticks: i32,
}

impl OldOnesArmyInfo {
    /// Creates the body from a wall-clock delay, saturating at `i32::MAX` ticks.
    #[must_use]
    pub fn from_duration(wait: Duration) -> Self {
        let ticks = wait.as_millis() * u128::from(TICKS_PER_SECOND) / 1000;
        Self {
            wait_ticks: i32::try_from(ticks).unwrap_or(i32::MAX),
        }
    }

    /// Returns the delay as a duration, or `None` when the tick count is negative.
    #[must_use]
    pub fn wait_time(self) -> Option<Duration> {
        let ticks = u64::try_from(self.wait_ticks).ok()?;
        Some(Duration::from_millis(ticks * 1000 / u64::from(TICKS_PER_SECOND)))
    }
}

impl PacketBody for OldOnesArmyInfo {
    const KIND: PacketKind = PacketKind::OLD_ONES_ARMY_INFO;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            wait_ticks: reader.read_i32()?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_i32(self.wait_ticks)?;
        Ok(())
    }
}
