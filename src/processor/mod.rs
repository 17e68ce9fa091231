//! The functional core: raw tree ⇄ constant pool.
pub mod compress;
pub mod decompress;
pub mod grid;
pub mod pool;

pub use compress::compress;
pub use decompress::decompress;

use crate::model::{CompressedGameMap, ConstantPoolType};

/// How many pool entries carry each tag, in tag order.
pub fn pool_histogram(map: &CompressedGameMap) -> Vec<(ConstantPoolType, usize)> {
    ConstantPoolType::ALL
        .iter()
        .map(|&ty| {
            let count = map
                .constant_pool()
                .iter()
                .filter(|entry| entry.entry_type() == ty)
                .count();
            (ty, count)
        })
        .collect()
}
