//! Constant-pool form of a map.
//!
//! Every distinct tile, layer, tileset coordinate and animation frame is
//! stored once in `constant_pool`; everything else refers to it by 1-based
//! position.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::geometry::{GridCoordinate, GridSize, PixelSize};
use super::raw::{GameMap, RawGameMap, RawGameMapTile, RawTileAnimationFrame};
use crate::error::Result;
use crate::processor;

/// 1-based position in a constant pool.
pub type PoolIndex = u32;

/// Wire tag of a pool entry. The numbering is part of the file format and
/// must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConstantPoolType {
    Coordinate = 1,
    BlockingTile = 2,
    NonBlockingTile = 3,
    StaticImageLayerAbove = 4,
    AnimationLayerAbove = 5,
    StaticImageLayerBelow = 6,
    AnimationLayerBelow = 7,
    AnimationFrame = 8,
}

impl ConstantPoolType {
    pub const ALL: [ConstantPoolType; 8] = [
        Self::Coordinate,
        Self::BlockingTile,
        Self::NonBlockingTile,
        Self::StaticImageLayerAbove,
        Self::AnimationLayerAbove,
        Self::StaticImageLayerBelow,
        Self::AnimationLayerBelow,
        Self::AnimationFrame,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: i64) -> Option<Self> {
        let pos = usize::try_from(tag).ok()?.checked_sub(1)?;
        Self::ALL.get(pos).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstantPoolEntry {
    Coordinate(GridCoordinate),
    Tile {
        layers: Vec<PoolIndex>,
        blocker: bool,
    },
    StaticImageLayer {
        coordinate: PoolIndex,
        above_player: bool,
    },
    AnimationLayer {
        frames: Vec<PoolIndex>,
        above_player: bool,
    },
    /// Frames are leaves; their coordinate is stored inline.
    AnimationFrame(RawTileAnimationFrame),
}

impl ConstantPoolEntry {
    pub fn entry_type(&self) -> ConstantPoolType {
        use ConstantPoolType as T;
        match self {
            Self::Coordinate(_) => T::Coordinate,
            Self::Tile { blocker: true, .. } => T::BlockingTile,
            Self::Tile { blocker: false, .. } => T::NonBlockingTile,
            Self::StaticImageLayer { above_player: true, .. } => T::StaticImageLayerAbove,
            Self::StaticImageLayer { above_player: false, .. } => T::StaticImageLayerBelow,
            Self::AnimationLayer { above_player: true, .. } => T::AnimationLayerAbove,
            Self::AnimationLayer { above_player: false, .. } => T::AnimationLayerBelow,
            Self::AnimationFrame(_) => T::AnimationFrame,
        }
    }

    /// Pool indices this entry points at.
    pub fn references(&self) -> &[PoolIndex] {
        match self {
            Self::Tile { layers, .. } => layers,
            Self::StaticImageLayer { coordinate, .. } => std::slice::from_ref(coordinate),
            Self::AnimationLayer { frames, .. } => frames,
            Self::Coordinate(_) | Self::AnimationFrame(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressedGameMap {
    id: String,
    size: GridSize,
    tile_size: PixelSize,
    constant_pool: Vec<ConstantPoolEntry>,
    /// Row-major, one pool index per grid cell.
    tiles: Vec<PoolIndex>,
    #[serde(skip)]
    raw: OnceCell<RawGameMap>,
}

impl CompressedGameMap {
    pub fn new(
        id: impl Into<String>,
        size: GridSize,
        tile_size: PixelSize,
        constant_pool: Vec<ConstantPoolEntry>,
        tiles: Vec<PoolIndex>,
    ) -> Self {
        Self {
            id: id.into(),
            size,
            tile_size,
            constant_pool,
            tiles,
            raw: OnceCell::new(),
        }
    }

    pub fn constant_pool(&self) -> &[ConstantPoolEntry] {
        &self.constant_pool
    }

    pub fn tiles(&self) -> &[PoolIndex] {
        &self.tiles
    }

    /// The decompressed map, built on first call and cached afterwards.
    ///
    /// A failed decompression is not cached; the next call retries.
    pub fn raw_game_map(&self) -> Result<&RawGameMap> {
        self.raw.get_or_try_init(|| processor::decompress(self))
    }

    /// Whether `raw_game_map` has already been computed.
    pub fn is_decompressed(&self) -> bool {
        self.raw.get().is_some()
    }
}

impl PartialEq for CompressedGameMap {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.size == other.size
            && self.tile_size == other.tile_size
            && self.constant_pool == other.constant_pool
            && self.tiles == other.tiles
    }
}

impl Eq for CompressedGameMap {}

impl GameMap for CompressedGameMap {
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
        Ok(&self.raw_game_map()?.raw_tiles)
    }
}
