//! Bit-packed tile encoding.
//!
//! ```text
//! u16 header
//! [u8 block_color]             if HAS_BLOCK_COLOR
//! [u8 wall_color]              if HAS_WALL_COLOR
//! [u16 block_id]               if ACTIVE
//!   [i16 frame_x, i16 frame_y] if the block id has frames
//! [u16 wall_id]                if HAS_WALL
//! [u8 liquid_amount, u8 type]  if HAS_LIQUID
//! ```
//!
//! Presence bits are always derived from the tile's values on encode; the
//! header is never carried forward from a previous decode.

use cursor::{ByteReader, ByteWriter};

use crate::error::{CodecError, CodecResult, FieldKind};
use crate::frames::FrameLookup;
use crate::types::{BlockId, BlockShape, Liquid, LiquidType, PaintColor, TileFrame, WallId, Wiring};

/// Smallest possible encoded tile (header only).
pub const MIN_TILE_BYTES: usize = 2;

/// Largest possible encoded tile.
pub const MAX_TILE_BYTES: usize = 2 + 1 + 1 + 2 + 4 + 2 + 2;

/// The 16-bit tile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileHeader(u16);

impl TileHeader {
    pub const ACTIVE: u16 = 1 << 0;
    pub const HAS_WALL: u16 = 1 << 2;
    pub const HAS_LIQUID: u16 = 1 << 3;
    pub const RED_WIRE: u16 = 1 << 4;
    pub const HALVED: u16 = 1 << 5;
    pub const HAS_ACTUATOR: u16 = 1 << 6;
    pub const ACTUATED: u16 = 1 << 7;
    pub const BLUE_WIRE: u16 = 1 << 8;
    pub const GREEN_WIRE: u16 = 1 << 9;
    pub const HAS_BLOCK_COLOR: u16 = 1 << 10;
    pub const HAS_WALL_COLOR: u16 = 1 << 11;
    pub const SLOPE_MASK: u16 = 0b111 << Self::SLOPE_SHIFT;
    pub const YELLOW_WIRE: u16 = 1 << 15;

    const SLOPE_SHIFT: u16 = 12;

    /// Creates a header from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw header bits.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns `true` if every bit in `mask` is set.
    #[must_use]
    pub const fn contains(self, mask: u16) -> bool {
        self.0 & mask == mask
    }

    /// Sets or clears the bits in `mask`.
    #[must_use]
    pub const fn with(self, mask: u16, value: bool) -> Self {
        if value {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    /// Returns the three-bit slope field.
    #[must_use]
    pub const fn slope(self) -> u8 {
        ((self.0 & Self::SLOPE_MASK) >> Self::SLOPE_SHIFT) as u8
    }

    /// Replaces the three-bit slope field. Bits above the field are dropped.
    #[must_use]
    pub const fn with_slope(self, slope: u8) -> Self {
        let bits = ((slope as u16) << Self::SLOPE_SHIFT) & Self::SLOPE_MASK;
        Self((self.0 & !Self::SLOPE_MASK) | bits)
    }

    /// Returns the wire flags encoded in this header.
    #[must_use]
    pub const fn wiring(self) -> Wiring {
        Wiring {
            red: self.contains(Self::RED_WIRE),
            blue: self.contains(Self::BLUE_WIRE),
            green: self.contains(Self::GREEN_WIRE),
            yellow: self.contains(Self::YELLOW_WIRE),
        }
    }
}

/// An active block occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub id: BlockId,
    pub shape: BlockShape,
    /// Present exactly when the block id is frame-dependent.
    pub frame: Option<TileFrame>,
}

impl Block {
    /// Creates a normal-shaped block without frame coordinates.
    #[must_use]
    pub const fn new(id: BlockId) -> Self {
        Self {
            id,
            shape: BlockShape::Normal,
            frame: None,
        }
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: BlockShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub const fn with_frame(mut self, frame: TileFrame) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// One cell of the world grid.
///
/// Position is supplied by the owning grid and is not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub block: Option<Block>,
    pub wall: Option<WallId>,
    pub liquid: Option<Liquid>,
    pub block_color: Option<PaintColor>,
    pub wall_color: Option<PaintColor>,
    pub wiring: Wiring,
    pub has_actuator: bool,
    pub is_actuated: bool,
}

impl Tile {
    /// Computes the header this tile encodes to.
    #[must_use]
    pub fn header(&self) -> TileHeader {
        let shape = self.block.map_or(BlockShape::Normal, |block| block.shape);
        TileHeader::default()
            .with(TileHeader::ACTIVE, self.block.is_some())
            .with(TileHeader::HAS_WALL, self.wall.is_some())
            .with(TileHeader::HAS_LIQUID, self.liquid.is_some())
            .with(TileHeader::RED_WIRE, self.wiring.red)
            .with(TileHeader::HALVED, shape == BlockShape::Halved)
            .with(TileHeader::HAS_ACTUATOR, self.has_actuator)
            .with(TileHeader::ACTUATED, self.is_actuated)
            .with(TileHeader::BLUE_WIRE, self.wiring.blue)
            .with(TileHeader::GREEN_WIRE, self.wiring.green)
            .with(TileHeader::HAS_BLOCK_COLOR, self.block_color.is_some())
            .with(TileHeader::HAS_WALL_COLOR, self.wall_color.is_some())
            .with(TileHeader::YELLOW_WIRE, self.wiring.yellow)
            .with_slope(shape.slope_bits())
    }

    /// Returns the number of bytes this tile encodes to.
    #[must_use]
    pub fn encoded_len(&self, frames: &dyn FrameLookup) -> usize {
        let mut len = MIN_TILE_BYTES;
        len += usize::from(self.block_color.is_some());
        len += usize::from(self.wall_color.is_some());
        if let Some(block) = self.block {
            len += 2;
            if frames.has_frames(block.id) {
                len += 4;
            }
        }
        if self.wall.is_some() {
            len += 2;
        }
        if self.liquid.is_some() {
            len += 2;
        }
        len
    }
}

/// Decodes one tile from the reader.
pub fn decode_tile(reader: &mut ByteReader<'_>, frames: &dyn FrameLookup) -> CodecResult<Tile> {
    let header = TileHeader::from_raw(reader.read_u16()?);
    let mut tile = Tile {
        wiring: header.wiring(),
        has_actuator: header.contains(TileHeader::HAS_ACTUATOR),
        is_actuated: header.contains(TileHeader::ACTUATED),
        ..Tile::default()
    };

    if header.contains(TileHeader::HAS_BLOCK_COLOR) {
        tile.block_color = Some(read_paint(reader, FieldKind::BlockColor)?);
    }
    if header.contains(TileHeader::HAS_WALL_COLOR) {
        tile.wall_color = Some(read_paint(reader, FieldKind::WallColor)?);
    }

    if header.contains(TileHeader::ACTIVE) {
        let id = BlockId::new(reader.read_u16()?);
        let frame = if frames.has_frames(id) {
            Some(TileFrame::new(reader.read_i16()?, reader.read_i16()?))
        } else {
            None
        };
        // Halved takes priority over any slope bits.
        let shape = if header.contains(TileHeader::HALVED) {
            BlockShape::Halved
        } else {
            BlockShape::from_slope_bits(header.slope())
        };
        tile.block = Some(Block { id, shape, frame });
    }

    if header.contains(TileHeader::HAS_WALL) {
        let raw = reader.read_u16()?;
        tile.wall = Some(WallId::new(raw).ok_or(CodecError::InvalidField {
            field: FieldKind::WallId,
            value: 0,
        })?);
    }

    if header.contains(TileHeader::HAS_LIQUID) {
        let amount = reader.read_u8()?;
        let kind = reader.read_u8()?;
        let kind = LiquidType::from_raw(kind).ok_or(CodecError::InvalidField {
            field: FieldKind::LiquidType,
            value: u64::from(kind),
        })?;
        tile.liquid = Some(Liquid::new(amount, kind).ok_or(CodecError::InvalidField {
            field: FieldKind::LiquidAmount,
            value: 0,
        })?);
    }

    Ok(tile)
}

/// Encodes one tile into the writer and returns the bytes written.
///
/// Fails with [`FieldKind::TileFrame`] when a block's frame presence does not
/// match what `frames` says its id requires.
pub fn encode_tile(
    tile: &Tile,
    writer: &mut ByteWriter<'_>,
    frames: &dyn FrameLookup,
) -> CodecResult<usize> {
    if let Some(block) = tile.block {
        if frames.has_frames(block.id) != block.frame.is_some() {
            return Err(CodecError::InvalidField {
                field: FieldKind::TileFrame,
                value: u64::from(block.id.raw()),
            });
        }
    }
    let needed = tile.encoded_len(frames);
    if writer.remaining() < needed {
        return Err(CodecError::BufferTooSmall {
            needed,
            available: writer.remaining(),
        });
    }

    writer.write_u16(tile.header().raw())?;
    if let Some(color) = tile.block_color {
        writer.write_u8(color.raw())?;
    }
    if let Some(color) = tile.wall_color {
        writer.write_u8(color.raw())?;
    }
    if let Some(block) = tile.block {
        writer.write_u16(block.id.raw())?;
        if let Some(frame) = block.frame {
            writer.write_i16(frame.x)?;
            writer.write_i16(frame.y)?;
        }
    }
    if let Some(wall) = tile.wall {
        writer.write_u16(wall.raw())?;
    }
    if let Some(liquid) = tile.liquid {
        writer.write_u8(liquid.amount.get())?;
        writer.write_u8(liquid.kind.raw())?;
    }
    Ok(needed)
}

fn read_paint(reader: &mut ByteReader<'_>, field: FieldKind) -> CodecResult<PaintColor> {
    let raw = reader.read_u8()?;
    PaintColor::from_wire(raw).ok_or(CodecError::InvalidField {
        field,
        value: u64::from(raw),
    })
}
