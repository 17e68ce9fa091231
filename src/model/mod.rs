pub mod compressed;
pub mod geometry;
pub mod raw;
mod wire;

pub use compressed::{CompressedGameMap, ConstantPoolEntry, ConstantPoolType, PoolIndex};
pub use geometry::{GridCoordinate, GridSize, PixelCoordinate, PixelSize};
pub use raw::{
    GameMap, RawAnimationLayer, RawGameMap, RawGameMapTile, RawGameMapTileLayer,
    RawStaticImageLayer, RawTileAnimationFrame,
};
