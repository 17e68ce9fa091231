//! Rebuild the raw tile tree from a constant pool.

use tracing::debug;

use super::grid;
use crate::error::{MapError, Result};
use crate::model::{
    CompressedGameMap, ConstantPoolEntry, GameMap, GridCoordinate, PoolIndex, RawAnimationLayer,
    RawGameMap, RawGameMapTile, RawGameMapTileLayer, RawStaticImageLayer, RawTileAnimationFrame,
};

/// A pool entry together with its own 1-based position.
#[derive(Debug, Clone, Copy)]
struct IndexedEntry<'a> {
    index: PoolIndex,
    entry: &'a ConstantPoolEntry,
}

impl IndexedEntry<'_> {
    fn unexpected(self, expected: &'static str) -> MapError {
        MapError::UnexpectedEntry {
            index: self.index,
            expected,
            found: self.entry.entry_type(),
        }
    }
}

/// Position → entry lookup. Tiles only point at layers and layers only at
/// leaves, so resolution is at most three levels deep.
struct PoolTable<'a> {
    entries: Vec<IndexedEntry<'a>>,
}

impl<'a> PoolTable<'a> {
    fn new(pool: &'a [ConstantPoolEntry]) -> Self {
        let entries = pool
            .iter()
            .zip(1..)
            .map(|(entry, index)| IndexedEntry { index, entry })
            .collect();
        Self { entries }
    }

    fn get(&self, index: PoolIndex) -> Result<IndexedEntry<'a>> {
        index
            .checked_sub(1)
            .and_then(|pos| self.entries.get(pos as usize))
            .copied()
            .ok_or(MapError::DanglingReference {
                index,
                pool_size: self.entries.len(),
            })
    }

    fn tile(&self, index: PoolIndex) -> Result<RawGameMapTile> {
        let found = self.get(index)?;
        match found.entry {
            ConstantPoolEntry::Tile { layers, blocker } => Ok(RawGameMapTile {
                layers: layers
                    .iter()
                    .map(|&layer| self.layer(layer))
                    .collect::<Result<_>>()?,
                blocker: *blocker,
            }),
            _ => Err(found.unexpected("a tile")),
        }
    }

    fn layer(&self, index: PoolIndex) -> Result<RawGameMapTileLayer> {
        let found = self.get(index)?;
        match found.entry {
            ConstantPoolEntry::StaticImageLayer {
                coordinate,
                above_player,
            } => Ok(RawStaticImageLayer {
                coordinate: self.coordinate(*coordinate)?,
                above_player: *above_player,
            }
            .into()),
            ConstantPoolEntry::AnimationLayer {
                frames,
                above_player,
            } => Ok(RawAnimationLayer {
                frames: frames
                    .iter()
                    .map(|&frame| self.frame(frame))
                    .collect::<Result<_>>()?,
                above_player: *above_player,
            }
            .into()),
            _ => Err(found.unexpected("a layer")),
        }
    }

    fn coordinate(&self, index: PoolIndex) -> Result<GridCoordinate> {
        let found = self.get(index)?;
        match found.entry {
            ConstantPoolEntry::Coordinate(coordinate) => Ok(*coordinate),
            _ => Err(found.unexpected("a coordinate")),
        }
    }

    fn frame(&self, index: PoolIndex) -> Result<RawTileAnimationFrame> {
        let found = self.get(index)?;
        match found.entry {
            ConstantPoolEntry::AnimationFrame(frame) => Ok(*frame),
            _ => Err(found.unexpected("an animation frame")),
        }
    }
}

/// Expand every grid cell back into a full tile.
///
/// Fails on a zero-width map with rows, on a tile count that does not match
/// the map size, on indices outside the pool and on indices naming the wrong
/// kind of entry.
pub fn decompress(map: &CompressedGameMap) -> Result<RawGameMap> {
    let size = map.size();
    let width = size.width as usize;
    let flat = map.tiles();
    if size.is_degenerate() {
        return Err(MapError::ShapeMismatch {
            what: "rows of a zero-width map".to_string(),
            expected: 0,
            actual: size.height as usize,
        });
    }
    if flat.len() != size.area() {
        return Err(MapError::ShapeMismatch {
            what: "tiles".to_string(),
            expected: size.area(),
            actual: flat.len(),
        });
    }

    let rows = grid::rows(flat, width);
    if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(MapError::ShapeMismatch {
            what: format!("row {row}"),
            expected: width,
            actual: cells.len(),
        });
    }

    let table = PoolTable::new(map.constant_pool());
    let raw_tiles = grid::map_grid(&rows, |&index: &PoolIndex| table.tile(index))?;

    debug!(
        id = map.id(),
        pool = map.constant_pool().len(),
        tiles = flat.len(),
        "decompressed map"
    );
    Ok(RawGameMap::new(map.id(), size, map.tile_size(), raw_tiles))
}
