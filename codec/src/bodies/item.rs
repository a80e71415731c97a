//! Item ownership and item alteration bodies.

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use super::{Flags8, PacketBody};
use crate::context::CodecContext;
use crate::error::CodecResult;

/// Releases ownership of a dropped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RemoveItemOwner {
    pub item_index: i16,
}

impl PacketBody for RemoveItemOwner {
    const KIND: PacketKind = PacketKind::REMOVE_ITEM_OWNER;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            item_index: reader.read_i16()?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_i16(self.item_index)?;
        Ok(())
    }
}

/// A packed color, red in the lowest byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn packed(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Optional overrides applied to an item's stats.
///
/// The first seven fields are gated by the first flags byte. The remaining
/// six are gated by an extension byte that is only present when bit 7 of
/// the first byte is set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemOverrides {
    pub color: Option<Rgba>,
    pub damage: Option<u16>,
    pub knockback: Option<f32>,
    pub animation_time: Option<u16>,
    pub use_time: Option<u16>,
    pub projectile_type: Option<i16>,
    pub projectile_speed: Option<f32>,
    pub width: Option<i16>,
    pub height: Option<i16>,
    pub scale: Option<f32>,
    pub ammo: Option<i16>,
    pub uses_ammo: Option<i16>,
    pub not_ammo: Option<bool>,
}

const EXTENSION_BIT: u8 = 7;

impl ItemOverrides {
    fn flags(&self) -> (Flags8, Flags8) {
        let mut extension = Flags8::default();
        extension.set(0, self.width.is_some());
        extension.set(1, self.height.is_some());
        extension.set(2, self.scale.is_some());
        extension.set(3, self.ammo.is_some());
        extension.set(4, self.uses_ammo.is_some());
        extension.set(5, self.not_ammo.is_some());

        let mut flags = Flags8::default();
        flags.set(0, self.color.is_some());
        flags.set(1, self.damage.is_some());
        flags.set(2, self.knockback.is_some());
        flags.set(3, self.animation_time.is_some());
        flags.set(4, self.use_time.is_some());
        flags.set(5, self.projectile_type.is_some());
        flags.set(6, self.projectile_speed.is_some());
        flags.set(EXTENSION_BIT, extension.raw() != 0);
        (flags, extension)
    }

    /// Returns `true` if no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let (flags, _) = self.flags();
        flags.raw() == 0
    }
}

/// Overrides the stats of an item instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterItem {
    pub item_index: i16,
    pub overrides: ItemOverrides,
}

impl PacketBody for AlterItem {
    const KIND: PacketKind = PacketKind::ALTER_ITEM;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        let item_index = reader.read_i16()?;
        let flags = Flags8::from_raw(reader.read_u8()?);
        let mut o = ItemOverrides::default();

        if flags.get(0) {
            o.color = Some(Rgba::from_packed(reader.read_u32()?));
        }
        if flags.get(1) {
            o.damage = Some(reader.read_u16()?);
        }
        if flags.get(2) {
            o.knockback = Some(reader.read_f32()?);
        }
        if flags.get(3) {
            o.animation_time = Some(reader.read_u16()?);
        }
        if flags.get(4) {
            o.use_time = Some(reader.read_u16()?);
        }
        if flags.get(5) {
            o.projectile_type = Some(reader.read_i16()?);
        }
        if flags.get(6) {
            o.projectile_speed = Some(reader.read_f32()?);
        }

        if flags.get(EXTENSION_BIT) {
            let extension = Flags8::from_raw(reader.read_u8()?);
            if extension.get(0) {
                o.width = Some(reader.read_i16()?);
            }
            if extension.get(1) {
                o.height = Some(reader.read_i16()?);
            }
            if extension.get(2) {
                o.scale = Some(reader.read_f32()?);
            }
            if extension.get(3) {
                o.ammo = Some(reader.read_i16()?);
            }
            if extension.get(4) {
                o.uses_ammo = Some(reader.read_i16()?);
            }
            if extension.get(5) {
                o.not_ammo = Some(reader.read_bool()?);
            }
        }

        Ok(Self {
            item_index,
            overrides: o,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        let o = &self.overrides;
        let (flags, extension) = o.flags();

        writer.write_i16(self.item_index)?;
        writer.write_u8(flags.raw())?;
        if let Some(color) = o.color {
            writer.write_u32(color.packed())?;
        }
        if let Some(damage) = o.damage {
            writer.write_u16(damage)?;
        }
        if let Some(knockback) = o.knockback {
            writer.write_f32(knockback)?;
        }
        if let Some(animation_time) = o.animation_time {
            writer.write_u16(animation_time)?;
        }
        if let Some(use_time) = o.use_time {
            writer.write_u16(use_time)?;
        }
        if let Some(projectile_type) = o.projectile_type {
            writer.write_i16(projectile_type)?;
        }
        if let Some(projectile_speed) = o.projectile_speed {
            writer.write_f32(projectile_speed)?;
        }

        if flags.get(EXTENSION_BIT) {
            writer.write_u8(extension.raw())?;
            if let Some(width) = o.width {
                writer.write_i16(width)?;
            }
            if let Some(height) = o.height {
                writer.write_i16(height)?;
            }
            if let Some(scale) = o.scale {
                writer.write_f32(scale)?;
            }
            if let Some(ammo) = o.ammo {
                writer.write_i16(ammo)?;
            }
            if let Some(uses_ammo) = o.uses_ammo {
                writer.write_i16(uses_ammo)?;
            }
            if let Some(not_ammo) = o.not_ammo {
                writer.write_bool(not_ammo)?;
            }
        }
        Ok(())
    }
}
