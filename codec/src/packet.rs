//! Kind dispatch between frames and typed packet bodies.

use std::borrow::Cow;

use cursor::{ByteReader, ByteWriter};
use wire::{begin_frame, decode_frame, finish_frame, PacketKind, RawFrame};

use crate::bodies::{
    AlterItem, AmbientEffect, AnglerQuest, EnterWorld, NpcBuffs, OldOnesArmyInfo, PacketBody,
    PlayerConnect, PlayerTeleportItem, RemoveItemOwner, RequestSign,
};
use crate::context::CodecContext;
use crate::error::CodecResult;
use crate::tile_square::TileSquare;

/// A body whose kind has no codec, preserved byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnknownPacket<'a> {
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_kind"))]
    pub kind: PacketKind,
    pub body: Cow<'a, [u8]>,
}

impl UnknownPacket<'_> {
    /// Detaches the body from the input buffer.
    #[must_use]
    pub fn into_owned(self) -> UnknownPacket<'static> {
        UnknownPacket {
            kind: self.kind,
            body: Cow::Owned(self.body.into_owned()),
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_kind<S: serde::Serializer>(kind: &PacketKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(kind.raw())
}

/// A decoded frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Packet<'a> {
    PlayerConnect(PlayerConnect),
    TileSquare(TileSquare),
    RemoveItemOwner(RemoveItemOwner),
    RequestSign(RequestSign),
    EnterWorld(EnterWorld),
    NpcBuffs(NpcBuffs),
    PlayerTeleportItem(PlayerTeleportItem),
    AnglerQuest(AnglerQuest),
    AlterItem(AlterItem),
    AmbientEffect(AmbientEffect),
    OldOnesArmyInfo(OldOnesArmyInfo),
    Unknown(UnknownPacket<'a>),
}

macro_rules! impl_from_body {
    ($($body:ident),* $(,)?) => {
        $(
            impl From<$body> for Packet<'_> {
                fn from(body: $body) -> Self {
                    Self::$body(body)
                }
            }
        )*
    };
}

impl_from_body!(
    PlayerConnect,
    TileSquare,
    RemoveItemOwner,
    RequestSign,
    EnterWorld,
    NpcBuffs,
    PlayerTeleportItem,
    AnglerQuest,
    AlterItem,
    AmbientEffect,
    OldOnesArmyInfo,
);

impl<'a> From<UnknownPacket<'a>> for Packet<'a> {
    fn from(packet: UnknownPacket<'a>) -> Self {
        Self::Unknown(packet)
    }
}

impl Packet<'_> {
    /// Returns the frame kind this packet is carried under.
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::PlayerConnect(_) => PlayerConnect::KIND,
            Self::TileSquare(_) => TileSquare::KIND,
            Self::RemoveItemOwner(_) => RemoveItemOwner::KIND,
            Self::RequestSign(_) => RequestSign::KIND,
            Self::EnterWorld(_) => EnterWorld::KIND,
            Self::NpcBuffs(_) => NpcBuffs::KIND,
            Self::PlayerTeleportItem(_) => PlayerTeleportItem::KIND,
            Self::AnglerQuest(_) => AnglerQuest::KIND,
            Self::AlterItem(_) => AlterItem::KIND,
            Self::AmbientEffect(_) => AmbientEffect::KIND,
            Self::OldOnesArmyInfo(_) => OldOnesArmyInfo::KIND,
            Self::Unknown(unknown) => unknown.kind,
        }
    }

    /// Returns `true` if the kind had no codec.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Detaches the packet from the input buffer.
    #[must_use]
    pub fn into_owned(self) -> Packet<'static> {
        match self {
            Self::PlayerConnect(p) => Packet::PlayerConnect(p),
            Self::TileSquare(p) => Packet::TileSquare(p),
            Self::RemoveItemOwner(p) => Packet::RemoveItemOwner(p),
            Self::RequestSign(p) => Packet::RequestSign(p),
            Self::EnterWorld(p) => Packet::EnterWorld(p),
            Self::NpcBuffs(p) => Packet::NpcBuffs(p),
            Self::PlayerTeleportItem(p) => Packet::PlayerTeleportItem(p),
            Self::AnglerQuest(p) => Packet::AnglerQuest(p),
            Self::AlterItem(p) => Packet::AlterItem(p),
            Self::AmbientEffect(p) => Packet::AmbientEffect(p),
            Self::OldOnesArmyInfo(p) => Packet::OldOnesArmyInfo(p),
            Self::Unknown(p) => Packet::Unknown(p.into_owned()),
        }
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, ctx: &CodecContext<'_>) -> CodecResult<()> {
        match self {
            Self::PlayerConnect(p) => p.write_body(writer, ctx),
            Self::TileSquare(p) => p.write_body(writer, ctx),
            Self::RemoveItemOwner(p) => p.write_body(writer, ctx),
            Self::RequestSign(p) => p.write_body(writer, ctx),
            Self::EnterWorld(p) => p.write_body(writer, ctx),
            Self::NpcBuffs(p) => p.write_body(writer, ctx),
            Self::PlayerTeleportItem(p) => p.write_body(writer, ctx),
            Self::AnglerQuest(p) => p.write_body(writer, ctx),
            Self::AlterItem(p) => p.write_body(writer, ctx),
            Self::AmbientEffect(p) => p.write_body(writer, ctx),
            Self::OldOnesArmyInfo(p) => p.write_body(writer, ctx),
            Self::Unknown(p) => Ok(writer.write_bytes(&p.body)?),
        }
    }
}

/// Decodes the first frame in `buf` into a packet.
///
/// Bytes after the frame are ignored; use [`wire::FrameIter`] with
/// [`decode_body`] to walk a stream.
pub fn decode_packet<'a>(buf: &'a [u8], ctx: &CodecContext<'_>) -> CodecResult<Packet<'a>> {
    let frame = decode_frame(buf, &ctx.wire_limits)?;
    decode_body(frame, ctx)
}

/// Decodes the body of an already split frame.
pub fn decode_body<'a>(frame: RawFrame<'a>, ctx: &CodecContext<'_>) -> CodecResult<Packet<'a>> {
    let body = frame.body;
    let packet: Packet<'a> = match frame.kind() {
        PacketKind::PLAYER_CONNECT => read_known::<PlayerConnect>(body, ctx)?.into(),
        PacketKind::TILE_SQUARE => read_known::<TileSquare>(body, ctx)?.into(),
        PacketKind::REMOVE_ITEM_OWNER => read_known::<RemoveItemOwner>(body, ctx)?.into(),
        PacketKind::REQUEST_SIGN => read_known::<RequestSign>(body, ctx)?.into(),
        PacketKind::ENTER_WORLD => read_known::<EnterWorld>(body, ctx)?.into(),
        PacketKind::NPC_BUFFS => read_known::<NpcBuffs>(body, ctx)?.into(),
        PacketKind::PLAYER_TELEPORT_ITEM => read_known::<PlayerTeleportItem>(body, ctx)?.into(),
        PacketKind::ANGLER_QUEST => read_known::<AnglerQuest>(body, ctx)?.into(),
        PacketKind::ALTER_ITEM => read_known::<AlterItem>(body, ctx)?.into(),
        PacketKind::AMBIENT_EFFECT => read_known::<AmbientEffect>(body, ctx)?.into(),
        PacketKind::OLD_ONES_ARMY_INFO => read_known::<OldOnesArmyInfo>(body, ctx)?.into(),
        kind => {
            tracing::debug!(kind = kind.raw(), len = body.len(), "no codec for kind, keeping raw body");
            Packet::Unknown(UnknownPacket {
                kind,
                body: Cow::Borrowed(body),
            })
        }
    };
    Ok(packet)
}

fn read_known<B: PacketBody>(body: &[u8], ctx: &CodecContext<'_>) -> CodecResult<B> {
    let mut reader = ByteReader::new(body);
    let value = B::read_body(&mut reader, ctx)?;
    if !reader.is_empty() {
        tracing::trace!(
            kind = B::KIND.raw(),
            trailing = reader.remaining(),
            "ignoring trailing body bytes"
        );
    }
    Ok(value)
}

/// Encodes a packet as a complete frame into `out`, returning the frame length.
pub fn encode_packet(packet: &Packet<'_>, ctx: &CodecContext<'_>, out: &mut [u8]) -> CodecResult<usize> {
    let mut writer = ByteWriter::new(out);
    let mark = begin_frame(&mut writer, packet.kind())?;
    packet.write_body(&mut writer, ctx)?;
    Ok(finish_frame(&mut writer, mark)?)
}

/// Encodes a single body type as a complete frame into `out`.
pub fn encode_body<B: PacketBody>(
    body: &B,
    ctx: &CodecContext<'_>,
    out: &mut [u8],
) -> CodecResult<usize> {
    let mut writer = ByteWriter::new(out);
    let mark = begin_frame(&mut writer, B::KIND)?;
    body.write_body(&mut writer, ctx)?;
    Ok(finish_frame(&mut writer, mark)?)
}
