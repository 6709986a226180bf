//! The tile grid the simulation runs on.

use bevy_ecs::resource::Resource;
use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

use crate::constants::TILE_SIZE;
use crate::error::{GridError, ParseError};

/// The value carried by a tile. The discriminants are the stable codes shared
/// with the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[repr(u8)]
pub enum TileValue {
    Wall = 0,
    Dot = 1,
    Empty = 2,
    GhostHouse = 3,
    Pill = 4,
}

impl TileValue {
    /// Whether actors may stand on this tile.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, TileValue::Wall)
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TileValue {
    type Error = ParseError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TileValue::Wall),
            1 => Ok(TileValue::Dot),
            2 => Ok(TileValue::Empty),
            3 => Ok(TileValue::GhostHouse),
            4 => Ok(TileValue::Pill),
            _ => Err(ParseError::UnknownTileCode(code)),
        }
    }
}

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub position: IVec2,
    pub value: TileValue,
}

/// Converts a pixel position into the tile containing it.
///
/// Uses floored division, so negative pixels land on negative (out of bounds) tiles.
pub fn pixel_to_tile(pixel: Vec2) -> IVec2 {
    (pixel / TILE_SIZE as f32).floor().as_ivec2()
}

/// Returns the pixel position of a tile's top-left corner.
pub fn tile_to_pixel(tile: IVec2) -> Vec2 {
    (tile * TILE_SIZE as i32).as_vec2()
}

/// Row-major tile storage with bounds-checked lookups.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileValue>,
}

impl TileGrid {
    /// Builds a grid from rows of tile values. Callers are expected to have
    /// validated that all rows have the same length.
    pub(crate) fn from_values(width: u32, height: u32, tiles: Vec<TileValue>) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self { width, height, tiles }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the size of the grid, in tiles.
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn contains(&self, position: IVec2) -> bool {
        position.x >= 0 && position.y >= 0 && (position.x as u32) < self.width && (position.y as u32) < self.height
    }

    fn index(&self, position: IVec2) -> Result<usize, GridError> {
        if self.contains(position) {
            Ok(position.y as usize * self.width as usize + position.x as usize)
        } else {
            Err(GridError::OutOfBounds(position))
        }
    }

    /// Looks up the tile at the given tile coordinates.
    pub fn tile_at(&self, position: IVec2) -> Result<Tile, GridError> {
        let index = self.index(position)?;
        Ok(Tile {
            position,
            value: self.tiles[index],
        })
    }

    /// Looks up the tile containing the given pixel.
    pub fn tile_at_pixel(&self, pixel: Vec2) -> Result<Tile, GridError> {
        self.tile_at(pixel_to_tile(pixel))
    }

    /// Mutates a tile in place.
    pub fn set_value(&mut self, position: IVec2, value: TileValue) -> Result<(), GridError> {
        let index = self.index(position)?;
        self.tiles[index] = value;
        Ok(())
    }

    /// Whether an actor may occupy the tile. Out-of-bounds tiles count as walls.
    pub fn is_passable(&self, position: IVec2) -> bool {
        self.tile_at(position).is_ok_and(|tile| tile.value.is_walkable())
    }

    /// Whether the tile containing this pixel may be occupied.
    pub fn is_passable_pixel(&self, pixel: Vec2) -> bool {
        self.is_passable(pixel_to_tile(pixel))
    }

    /// Counts the tiles carrying the given value.
    pub fn count(&self, value: TileValue) -> usize {
        self.tiles.iter().filter(|&&v| v == value).count()
    }

    /// Iterates over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(i, &value)| Tile {
            position: IVec2::new((i % width) as i32, (i / width) as i32),
            value,
        })
    }

    /// The raw tile codes, row-major.
    pub fn codes(&self) -> Vec<u8> {
        self.tiles.iter().map(|v| v.code()).collect()
    }
}
