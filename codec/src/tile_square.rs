//! Square batches of tiles.
//!
//! ```text
//! i16 size              sign bit set when a change type follows
//! [u8 change_type]
//! i16 x, i16 y          top-left world coordinate
//! tile[size * size]     outer loop over x offset, inner over y offset
//! ```

use std::ops::{Index, IndexMut};

use cursor::{ByteReader, ByteWriter};
use wire::PacketKind;

use crate::bodies::PacketBody;
use crate::context::CodecContext;
use crate::error::{CodecError, CodecResult, FieldKind, FramingReason, LimitKind};
use crate::frames::FrameLookup;
use crate::tile::{decode_tile, encode_tile, Tile, MIN_TILE_BYTES};
use crate::types::ChangeType;

const CHANGE_TYPE_FLAG: u16 = 0x8000;

/// Largest side length the size field can express.
pub const MAX_SQUARE_SIZE: u16 = 0x7FFF;

/// An N×N block of tiles indexed by `(dx, dy)` offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TileSlice {
    size: u16,
    tiles: Vec<Tile>,
}

impl TileSlice {
    /// Creates a slice of empty tiles.
    pub fn new(size: u16) -> CodecResult<Self> {
        check_size(size)?;
        let count = usize::from(size) * usize::from(size);
        Ok(Self {
            size,
            tiles: vec![Tile::default(); count],
        })
    }

    /// Builds a slice from columns, where `columns[dx][dy]` is the tile at
    /// that offset. Every column must be as long as there are columns.
    pub fn from_columns(columns: Vec<Vec<Tile>>) -> CodecResult<Self> {
        let width = columns.len();
        if let Some(column) = columns.iter().find(|column| column.len() != width) {
            return Err(CodecError::NotSquare {
                width,
                height: column.len(),
            });
        }
        let size = u16::try_from(width).map_err(|_| CodecError::LimitsExceeded {
            kind: LimitKind::TileSquareSize,
            limit: usize::from(MAX_SQUARE_SIZE),
            actual: width,
        })?;
        check_size(size)?;
        Ok(Self {
            size,
            tiles: columns.into_iter().flatten().collect(),
        })
    }

    /// Returns the side length.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Returns the number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, dx: usize, dy: usize) -> Option<&Tile> {
        self.offset(dx, dy).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, dx: usize, dy: usize) -> Option<&mut Tile> {
        self.offset(dx, dy).map(|i| &mut self.tiles[i])
    }

    /// Iterates `(dx, dy, tile)` in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        let size = usize::from(self.size);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i / size, i % size, tile))
    }

    fn offset(&self, dx: usize, dy: usize) -> Option<usize> {
        let size = usize::from(self.size);
        (dx < size && dy < size).then(|| dx * size + dy)
    }
}

impl Index<(usize, usize)> for TileSlice {
    type Output = Tile;

    fn index(&self, (dx, dy): (usize, usize)) -> &Tile {
        let size = usize::from(self.size);
        assert!(dx < size && dy < size, "tile offset ({dx}, {dy}) out of bounds for size {size}");
        &self.tiles[dx * size + dy]
    }
}

impl IndexMut<(usize, usize)> for TileSlice {
    fn index_mut(&mut self, (dx, dy): (usize, usize)) -> &mut Tile {
        let size = usize::from(self.size);
        assert!(dx < size && dy < size, "tile offset ({dx}, {dy}) out of bounds for size {size}");
        &mut self.tiles[dx * size + dy]
    }
}

fn check_size(size: u16) -> CodecResult<()> {
    if size > MAX_SQUARE_SIZE {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::TileSquareSize,
            limit: usize::from(MAX_SQUARE_SIZE),
            actual: usize::from(size),
        });
    }
    Ok(())
}

/// A square of tiles anchored at a world coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TileSquare {
    pub x: i16,
    pub y: i16,
    pub change_type: Option<ChangeType>,
    pub tiles: TileSlice,
}

impl TileSquare {
    /// Returns the number of body bytes this square encodes to.
    #[must_use]
    pub fn encoded_len(&self, frames: &dyn FrameLookup) -> usize {
        let header = 2 + usize::from(self.change_type.is_some()) + 4;
        header
            + self
                .tiles
                .tiles
                .iter()
                .map(|tile| tile.encoded_len(frames))
                .sum::<usize>()
    }
}

impl PacketBody for TileSquare {
    const KIND: PacketKind = PacketKind::TILE_SQUARE;

    fn read_body(reader: &mut ByteReader<'_>, ctx: &CodecContext<'_>) -> CodecResult<Self> {
        let raw_size = reader.read_u16()?;
        let size = raw_size & MAX_SQUARE_SIZE;
        let change_type = if raw_size & CHANGE_TYPE_FLAG == 0 {
            None
        } else {
            let raw = reader.read_u8()?;
            Some(ChangeType::new(raw).ok_or(CodecError::InvalidField {
                field: FieldKind::ChangeType,
                value: 0,
            })?)
        };
        let x = reader.read_i16()?;
        let y = reader.read_i16()?;

        if size > ctx.limits.max_tile_square_size {
            tracing::debug!(size, limit = ctx.limits.max_tile_square_size, "tile square over limit");
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::TileSquareSize,
                limit: usize::from(ctx.limits.max_tile_square_size),
                actual: usize::from(size),
            });
        }
        let count = usize::from(size) * usize::from(size);
        if count * MIN_TILE_BYTES > reader.remaining() {
            tracing::debug!(size, remaining = reader.remaining(), "tile square cannot fit body");
            return Err(CodecError::InvalidFraming(FramingReason::TileSquareTooLarge {
                size,
                remaining: reader.remaining(),
            }));
        }

        let mut tiles = Vec::with_capacity(count);
        for _ in 0..count {
            tiles.push(decode_tile(reader, ctx.frames)?);
        }
        Ok(Self {
            x,
            y,
            change_type,
            tiles: TileSlice { size, tiles },
        })
    }

    fn write_body(&self, writer: &mut ByteWriter<'_>, ctx: &CodecContext<'_>) -> CodecResult<()> {
        let mut raw_size = self.tiles.size;
        if self.change_type.is_some() {
            raw_size |= CHANGE_TYPE_FLAG;
        }
        writer.write_u16(raw_size)?;
        if let Some(change_type) = self.change_type {
            writer.write_u8(change_type.raw())?;
        }
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        for tile in &self.tiles.tiles {
            encode_tile(tile, writer, ctx.frames)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Block;
    use crate::types::{BlockId, WallId};

    fn encode(square: &TileSquare) -> Vec<u8> {
        let ctx = CodecContext::default();
        let mut buf = vec![0u8; square.encoded_len(ctx.frames)];
        let mut writer = ByteWriter::new(&mut buf);
        square.write_body(&mut writer, &ctx).unwrap();
        assert_eq!(writer.remaining(), 0);
        buf
    }

    fn stone() -> Tile {
        Tile {
            block: Some(Block::new(BlockId::new(1))),
            ..Tile::default()
        }
    }

    #[test]
    fn slice_rejects_non_square() {
        let err = TileSlice::from_columns(vec![vec![Tile::default(); 2], vec![Tile::default(); 3]])
            .unwrap_err();
        assert_eq!(err, CodecError::NotSquare { width: 2, height: 3 });
    }

    #[test]
    fn slice_indexing_is_column_major() {
        let mut slice = TileSlice::new(3).unwrap();
        slice[(2, 0)] = stone();
        let order: Vec<_> = slice.iter().map(|(dx, dy, _)| (dx, dy)).collect();
        assert_eq!(order[1], (0, 1));
        assert_eq!(order[6], (2, 0));
        assert_eq!(slice.get(2, 0), Some(&stone()));
        assert!(slice.get(3, 0).is_none());
        assert_eq!(slice.len(), 9);
    }

    #[test]
    fn slice_size_limit() {
        assert!(TileSlice::new(MAX_SQUARE_SIZE + 1).is_err());
    }

    #[test]
    fn without_change_type() {
        let mut tiles = TileSlice::new(1).unwrap();
        tiles[(0, 0)] = stone();
        let square = TileSquare {
            x: 10,
            y: -2,
            change_type: None,
            tiles,
        };
        let bytes = encode(&square);
        assert_eq!(bytes, vec![1, 0, 10, 0, 0xFE, 0xFF, 0x01, 0x00, 1, 0]);

        let decoded =
            TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default()).unwrap();
        assert_eq!(decoded, square);
    }

    #[test]
    fn with_change_type() {
        let mut tiles = TileSlice::new(2).unwrap();
        tiles[(1, 1)].wall = WallId::new(5);
        let square = TileSquare {
            x: 0,
            y: 0,
            change_type: Some(ChangeType::HONEY_LAVA),
            tiles,
        };
        let bytes = encode(&square);
        assert_eq!(&bytes[..3], &[2, 0x80, 3]);

        let decoded =
            TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default()).unwrap();
        assert_eq!(decoded, square);
    }

    #[test]
    fn zero_change_type_rejected() {
        let bytes = [1, 0x80, 0, 0, 0, 0, 0, 0, 0];
        let err = TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidField {
                field: FieldKind::ChangeType,
                value: 0
            }
        );
    }

    #[test]
    fn declared_size_larger_than_body_fails_fast() {
        let bytes = [200, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFraming(FramingReason::TileSquareTooLarge {
                size: 200,
                remaining: 4
            })
        );
    }

    #[test]
    fn size_over_limit_rejected() {
        let bytes = [0xFF, 0x7F, 0, 0, 0, 0];
        let err = TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::TileSquareSize,
                ..
            }
        ));
    }

    #[test]
    fn smallest_and_largest_default_sizes_roundtrip() {
        let ctx = CodecContext::default();
        for size in [1, ctx.limits.max_tile_square_size] {
            let last = usize::from(size) - 1;
            let mut tiles = TileSlice::new(size).unwrap();
            tiles[(0, 0)].wall = WallId::new(4);
            tiles[(last, last)] = stone();
            let square = TileSquare {
                x: 100,
                y: 200,
                change_type: Some(ChangeType::LAVA_WATER),
                tiles,
            };
            let bytes = encode(&square);
            assert_eq!(bytes.len(), square.encoded_len(ctx.frames));

            let mut reader = ByteReader::new(&bytes);
            let decoded = TileSquare::read_body(&mut reader, &ctx).unwrap();
            assert!(reader.is_empty());
            assert_eq!(decoded, square, "size {size}");
        }
    }

    #[test]
    fn empty_square() {
        let square = TileSquare::default();
        let bytes = encode(&square);
        assert_eq!(bytes, vec![0; 6]);
        let decoded =
            TileSquare::read_body(&mut ByteReader::new(&bytes), &CodecContext::default()).unwrap();
        assert_eq!(decoded, square);
    }
}
