//! Player connection and player item bodies.

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use super::{read_string, write_string, PacketBody};
use crate::context::CodecContext;
use crate::error::{CodecError, CodecResult, FieldKind};

/// The first packet a client sends, carrying its protocol version string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlayerConnect {
    pub version: String,
}

impl PlayerConnect {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl PacketBody for PlayerConnect {
    const KIND: PacketKind = PacketKind::PLAYER_CONNECT;

    fn read_body(reader: &mut ByteReader<'_>, ctx: &CodecContext<'_>) -> CodecResult<Self> {
        Ok(Self {
            version: read_string(reader, ctx)?,
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        write_string(writer, &self.version)
    }
}

/// An item that teleports the player when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum TeleportItem {
    TeleportationPotion = 0,
    MagicConch = 1,
    DemonConch = 2,
}

impl TeleportItem {
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::TeleportationPotion),
            1 => Some(Self::MagicConch),
            2 => Some(Self::DemonConch),
            _ => None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Sent when a player uses a teleportation item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlayerTeleportItem {
    pub item: TeleportItem,
}

impl PacketBody for PlayerTeleportItem {
    const KIND: PacketKind = PacketKind::PLAYER_TELEPORT_ITEM;

    fn read_body(reader: &mut ByteReader<'_>, _ctx: &CodecContext<'_>) -> CodecResult<Self> {
        let raw = reader.read_u8()?;
        let item = TeleportItem::from_raw(raw).ok_or(CodecError::InvalidField {
            field: FieldKind::TeleportItem,
            value: u64::from(raw),
        })?;
        Ok(Self { item })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, _ctx: &CodecContext<'_>) -> CodecResult<()> {
        writer.write_u8(self.item.raw())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teleport_item_codes() {
        for item in [
            TeleportItem::TeleportationPotion,
            TeleportItem::MagicConch,
            TeleportItem::DemonConch,
        ] {
            assert_eq!(TeleportItem::from_raw(item.raw()), Some(item));
        }
        assert!(TeleportItem::from_raw(3).is_none());
    }

    #[test]
    fn teleport_item_rejects_unknown() {
        let ctx = CodecContext::default();
        let err = PlayerTeleportItem::read_body(&mut ByteReader::new(&[9]), &ctx).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidField {
                field: FieldKind::TeleportItem,
                value: 9
            }
        );
    }

    #[test]
    fn player_connect_body() {
        let ctx = CodecContext::default();
        let packet = PlayerConnect::new("Terraria194");
        let mut buf = [0u8; 16];
        let mut writer = ByteWriter::new(&mut buf);
        packet.write_body(&mut writer, &ctx).unwrap();
        let len = writer.finish();
        assert_eq!(&buf[..len], b"\x0bTerraria194");

        let decoded = PlayerConnect::read_body(&mut ByteReader::new(&buf[..len]), &ctx).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn player_connect_empty_version() {
        let ctx = CodecContext::default();
        let decoded = PlayerConnect::read_body(&mut ByteReader::new(&[0]), &ctx).unwrap();
        assert!(decoded.version.is_empty());
    }
}
