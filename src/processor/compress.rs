//! Two-pass constant pool builder.
//!
//! Pass 1 walks the tiles row-major and hands out a raw index to every
//! distinct node (tile, layer, coordinate, frame) in pre-order, parent
//! before children. Pass 2 repeats the exact same walk and inserts the
//! finished pool entries, whose child references are the pass-1 indices.
//! Both passes use the same insert-if-absent semantics, so an entry's final
//! position equals the raw index of the node it was built from. Changing
//! the visit order of one pass without the other breaks every reference.

use tracing::debug;

use super::pool::OrderedPool;
use crate::model::{
    CompressedGameMap, ConstantPoolEntry, GridCoordinate, PoolIndex, RawGameMap, RawGameMapTile,
    RawGameMapTileLayer, RawTileAnimationFrame,
};

/// Dedup key for pass 1. Variants keep e.g. a coordinate and a frame with the
/// same fields apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RawNode<'a> {
    Tile(&'a RawGameMapTile),
    Layer(&'a RawGameMapTileLayer),
    Coordinate(GridCoordinate),
    Frame(&'a RawTileAnimationFrame),
}

type RawPool<'a> = OrderedPool<RawNode<'a>>;

fn raw_index(raw: &RawPool<'_>, node: RawNode<'_>) -> PoolIndex {
    match raw.index_of(&node) {
        Some(index) => index,
        None => panic!("{node:?} was not visited in the index pass"),
    }
}

/// A node of the raw tree that takes part in both passes.
trait Compressable {
    /// Pass 1: record this node and its descendants.
    fn record<'a>(&'a self, raw: &mut RawPool<'a>);

    /// Pass 2: add the finished entries for this node and its descendants.
    fn emit(&self, raw: &RawPool<'_>, pool: &mut OrderedPool<ConstantPoolEntry>);
}

/// Insert `entry` and check it landed where pass 1 said it would.
fn place(pool: &mut OrderedPool<ConstantPoolEntry>, entry: ConstantPoolEntry, expected: PoolIndex) {
    let index = pool.insert(entry);
    debug_assert_eq!(index, expected, "constant pool diverged from the index pass");
}

impl Compressable for RawGameMapTile {
    fn record<'a>(&'a self, raw: &mut RawPool<'a>) {
        raw.insert(RawNode::Tile(self));
        for layer in &self.layers {
            layer.record(raw);
        }
    }

    fn emit(&self, raw: &RawPool<'_>, pool: &mut OrderedPool<ConstantPoolEntry>) {
        let entry = ConstantPoolEntry::Tile {
            layers: self
                .layers
                .iter()
                .map(|layer| raw_index(raw, RawNode::Layer(layer)))
                .collect(),
            blocker: self.blocker,
        };
        place(pool, entry, raw_index(raw, RawNode::Tile(self)));
        for layer in &self.layers {
            layer.emit(raw, pool);
        }
    }
}

impl Compressable for RawGameMapTileLayer {
    fn record<'a>(&'a self, raw: &mut RawPool<'a>) {
        raw.insert(RawNode::Layer(self));
        match self {
            Self::StaticImage(layer) => {
                raw.insert(RawNode::Coordinate(layer.coordinate));
            }
            Self::Animation(layer) => {
                for frame in &layer.frames {
                    raw.insert(RawNode::Frame(frame));
                }
            }
        }
    }

    fn emit(&self, raw: &RawPool<'_>, pool: &mut OrderedPool<ConstantPoolEntry>) {
        let own = raw_index(raw, RawNode::Layer(self));
        match self {
            Self::StaticImage(layer) => {
                let coordinate = raw_index(raw, RawNode::Coordinate(layer.coordinate));
                let entry = ConstantPoolEntry::StaticImageLayer {
                    coordinate,
                    above_player: layer.above_player,
                };
                place(pool, entry, own);
                place(pool, ConstantPoolEntry::Coordinate(layer.coordinate), coordinate);
            }
            Self::Animation(layer) => {
                let entry = ConstantPoolEntry::AnimationLayer {
                    frames: layer
                        .frames
                        .iter()
                        .map(|frame| raw_index(raw, RawNode::Frame(frame)))
                        .collect(),
                    above_player: layer.above_player,
                };
                place(pool, entry, own);
                for frame in &layer.frames {
                    place(
                        pool,
                        ConstantPoolEntry::AnimationFrame(*frame),
                        raw_index(raw, RawNode::Frame(frame)),
                    );
                }
            }
        }
    }
}

/// Deduplicate `map` into a constant pool plus one index per grid cell.
pub fn compress(map: &RawGameMap) -> CompressedGameMap {
    let mut raw = RawPool::new();
    for tile in map.flattened_tiles() {
        tile.record(&mut raw);
    }

    let mut pool = OrderedPool::new();
    for tile in map.flattened_tiles() {
        tile.emit(&raw, &mut pool);
    }
    assert_eq!(
        pool.len(),
        raw.len(),
        "constant pool and index pass disagree on the number of distinct nodes"
    );

    let tiles: Vec<PoolIndex> = map
        .flattened_tiles()
        .map(|tile| raw_index(&raw, RawNode::Tile(tile)))
        .collect();

    debug!(
        id = %map.id,
        pool = pool.len(),
        tiles = tiles.len(),
        "compressed map"
    );

    CompressedGameMap::new(
        map.id.clone(),
        map.size,
        map.tile_size,
        pool.into_vec(),
        tiles,
    )
}
