//! Applying tile squares to live world state.

use crate::error::CodecResult;
use crate::tile::Tile;
use crate::tile_square::{TileSlice, TileSquare};

/// A world tile store addressed by absolute coordinates.
pub trait TileGrid {
    /// Returns the tile at `(x, y)`, or `None` outside the world.
    fn get_tile(&self, x: i32, y: i32) -> Option<Tile>;

    /// Stores a tile at `(x, y)`. Returns `false` outside the world.
    fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool;
}

impl TileSquare {
    /// Writes every tile of the square into `grid`.
    ///
    /// Cells that fall outside the grid are skipped. Returns the number of
    /// tiles written.
    pub fn apply_to<G: TileGrid + ?Sized>(&self, grid: &mut G) -> usize {
        let mut written = 0;
        for (dx, dy, tile) in self.tiles.iter() {
            let (x, y) = world_pos(self.x, self.y, dx, dy);
            if grid.set_tile(x, y, *tile) {
                written += 1;
            }
        }
        if written < self.tiles.len() {
            tracing::trace!(
                x = self.x,
                y = self.y,
                skipped = self.tiles.len() - written,
                "tile square partially outside grid"
            );
        }
        written
    }

    /// Reads a `size`×`size` square from `grid` with its top-left at `(x, y)`.
    ///
    /// Cells outside the grid are captured as empty tiles.
    pub fn capture<G: TileGrid + ?Sized>(grid: &G, x: i16, y: i16, size: u16) -> CodecResult<Self> {
        let mut tiles = TileSlice::new(size)?;
        let size = usize::from(size);
        for dx in 0..size {
            for dy in 0..size {
                let (wx, wy) = world_pos(x, y, dx, dy);
                if let Some(tile) = grid.get_tile(wx, wy) {
                    tiles[(dx, dy)] = tile;
                }
            }
        }
        Ok(Self {
            x,
            y,
            change_type: None,
            tiles,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn world_pos(x: i16, y: i16, dx: usize, dy: usize) -> (i32, i32) {
    // Offsets are below 0x8000, so they fit an i32.
    (i32::from(x) + dx as i32, i32::from(y) + dy as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Block;
    use crate::types::{BlockId, WallId};

    struct VecGrid {
        width: i32,
        height: i32,
        tiles: Vec<Tile>,
    }

    impl VecGrid {
        fn new(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                tiles: vec![Tile::default(); (width * height) as usize],
            }
        }

        fn index(&self, x: i32, y: i32) -> Option<usize> {
            ((0..self.width).contains(&x) && (0..self.height).contains(&y))
                .then(|| (y * self.width + x) as usize)
        }
    }

    impl TileGrid for VecGrid {
        fn get_tile(&self, x: i32, y: i32) -> Option<Tile> {
            self.index(x, y).map(|i| self.tiles[i])
        }

        fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
            match self.index(x, y) {
                Some(i) => {
                    self.tiles[i] = tile;
                    true
                }
                None => false,
            }
        }
    }

    fn dirt() -> Tile {
        Tile {
            block: Some(Block::new(BlockId::new(0))),
            ..Tile::default()
        }
    }

    #[test]
    fn apply_writes_every_tile_in_bounds() {
        let mut grid = VecGrid::new(8, 8);
        let mut square = TileSquare {
            x: 2,
            y: 3,
            ..TileSquare::default()
        };
        square.tiles = TileSlice::new(2).unwrap();
        square.tiles[(1, 0)] = dirt();

        assert_eq!(square.apply_to(&mut grid), 4);
        assert_eq!(grid.get_tile(3, 3), Some(dirt()));
        assert_eq!(grid.get_tile(2, 3), Some(Tile::default()));
    }

    #[test]
    fn apply_skips_out_of_bounds() {
        let mut grid = VecGrid::new(4, 4);
        let mut square = TileSquare {
            x: 3,
            y: -1,
            ..TileSquare::default()
        };
        square.tiles = TileSlice::new(2).unwrap();
        square.tiles[(0, 1)] = dirt();

        assert_eq!(square.apply_to(&mut grid), 1);
        assert_eq!(grid.get_tile(3, 0), Some(dirt()));
    }

    #[test]
    fn capture_then_apply_elsewhere() {
        let mut grid = VecGrid::new(6, 6);
        let wall = Tile {
            wall: WallId::new(2),
            ..Tile::default()
        };
        grid.set_tile(1, 1, wall);
        grid.set_tile(2, 2, dirt());

        let mut square = TileSquare::capture(&grid, 1, 1, 2).unwrap();
        assert_eq!(square.tiles[(0, 0)], wall);
        assert_eq!(square.tiles[(1, 1)], dirt());

        square.x = 4;
        square.y = 4;
        assert_eq!(square.apply_to(&mut grid), 4);
        assert_eq!(grid.get_tile(4, 4), Some(wall));
        assert_eq!(grid.get_tile(5, 5), Some(dirt()));
    }

    #[test]
    fn capture_outside_grid_is_empty() {
        let grid = VecGrid::new(2, 2);
        let square = TileSquare::capture(&grid, -5, -5, 2).unwrap();
        assert!(square.tiles.iter().all(|(_, _, tile)| *tile == Tile::default()));
    }
}
