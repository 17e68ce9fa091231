//! The uncompressed tile tree: map → rows → tiles → layers → frames.

use serde::{Deserialize, Serialize};

use super::geometry::{GridCoordinate, GridSize, PixelSize};
use crate::error::Result;

/// Anything that can be drawn as a tile map.
pub trait GameMap {
    fn id(&self) -> &str;

    /// How many tiles in this map?
    fn size(&self) -> GridSize;

    /// How large (in pixels) is every tile in this map?
    fn tile_size(&self) -> PixelSize;

    /// The map size in pixels.
    fn pixel_size(&self) -> PixelSize {
        self.tile_size() * self.size()
    }

    /// Rows of tiles, top row first.
    fn raw_tiles(&self) -> Result<&[Vec<RawGameMapTile>]>;
}

/// A map exactly as the loader produced it.
///
/// On disk this is `<id>.json`, next to an `<id>-tileset.png` that the
/// layer coordinates index into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameMap {
    pub id: String,
    pub size: GridSize,
    pub tile_size: PixelSize,
    pub raw_tiles: Vec<Vec<RawGameMapTile>>,
}

impl RawGameMap {
    pub fn new(
        id: impl Into<String>,
        size: GridSize,
        tile_size: PixelSize,
        raw_tiles: Vec<Vec<RawGameMapTile>>,
    ) -> Self {
        Self {
            id: id.into(),
            size,
            tile_size,
            raw_tiles,
        }
    }

    /// Tiles in row-major order.
    pub fn flattened_tiles(&self) -> impl Iterator<Item = &RawGameMapTile> {
        self.raw_tiles.iter().flatten()
    }
}

impl GameMap for RawGameMap {
    fn id(&self) -> &str {
        &self.id
    }

    fn size(&self) -> GridSize {
        self.size
    }

    fn tile_size(&self) -> PixelSize {
        self.tile_size
    }

    fn raw_tiles(&self) -> Result<&[Vec<RawGameMapTile>]> {
        Ok(&self.raw_tiles)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawGameMapTile {
    /// Drawn in order, first layer at the bottom.
    pub layers: Vec<RawGameMapTileLayer>,
    pub blocker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawGameMapTileLayer {
    StaticImage(RawStaticImageLayer),
    Animation(RawAnimationLayer),
}

impl RawGameMapTileLayer {
    /// Whether the layer is composited over the player sprite.
    pub fn above_player(&self) -> bool {
        match self {
            Self::StaticImage(layer) => layer.above_player,
            Self::Animation(layer) => layer.above_player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStaticImageLayer {
    /// Cell in the tileset image.
    pub coordinate: GridCoordinate,
    pub above_player: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnimationLayer {
    /// Playback order.
    pub frames: Vec<RawTileAnimationFrame>,
    pub above_player: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTileAnimationFrame {
    pub coordinate: GridCoordinate,
    pub duration: i32,
}

impl From<RawStaticImageLayer> for RawGameMapTileLayer {
    fn from(layer: RawStaticImageLayer) -> Self {
        Self::StaticImage(layer)
    }
}

impl From<RawAnimationLayer> for RawGameMapTileLayer {
    fn from(layer: RawAnimationLayer) -> Self {
        Self::Animation(layer)
    }
}
