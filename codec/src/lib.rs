//! Packet body codecs for the terrawire protocol.
//!
//! This crate sits on top of `wire` framing and turns frame bodies into typed
//! packets and back.
//!
//! # Features
//!
//! - Bit-packed tile encoding with flag-derived optional fields
//! - Tile squares with the sign-bit change-type marker
//! - Fixed-layout and flag-gated bodies for the supported packet kinds
//! - Opaque passthrough of kinds without a codec
//! - Envelopes that forward untouched frames byte for byte
//!
//! # Design Principles
//!
//! - **Panic-free decoding** - Every length and count is checked against the
//!   bytes actually present.
//! - **Caller-provided buffers** - Encoding writes into a slice sized by the caller.
//! - **Exact round trips** - Presence bits are derived from values, never stored.

mod bodies;
mod context;
mod envelope;
mod error;
mod frames;
mod grid;
mod limits;
mod packet;
mod tile;
mod tile_square;
mod types;

pub use bodies::{
    AlterItem, AmbientEffect, AmbientEffectType, AnglerQuest, EnterWorld, ItemOverrides, NpcBuff,
    NpcBuffs, OldOnesArmyInfo, PacketBody, PlayerConnect, PlayerTeleportItem, RemoveItemOwner,
    RequestSign, Rgba, TeleportItem, NPC_BUFF_SLOTS, TICKS_PER_SECOND,
};
pub use context::CodecContext;
pub use envelope::{decode_envelope, PacketEnvelope};
pub use error::{CodecError, CodecResult, FieldKind, FramingReason, LimitKind};
pub use frames::{BlockFrames, FrameLookup};
pub use grid::TileGrid;
pub use limits::CodecLimits;
pub use packet::{decode_body, decode_packet, encode_body, encode_packet, Packet, UnknownPacket};
pub use tile::{decode_tile, encode_tile, Block, Tile, TileHeader, MAX_TILE_BYTES, MIN_TILE_BYTES};
pub use tile_square::{TileSlice, TileSquare, MAX_SQUARE_SIZE};
pub use types::{
    BlockId, BlockShape, ChangeType, Liquid, LiquidType, PaintColor, TileFrame, WallId, Wiring,
};
pub use wire::{Limits as WireLimits, PacketKind};
