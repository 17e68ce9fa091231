use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ConstantPoolType, PoolIndex};

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    /// Invalid JSON, an unknown type tag, or a payload that does not fit its tag.
    #[error("malformed wire input: {0}")]
    MalformedWireInput(#[from] serde_json::Error),

    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("constant pool index {index} is out of range 1..={pool_size}")]
    DanglingReference { index: PoolIndex, pool_size: usize },

    #[error("shape mismatch in {what}: expected {expected}, found {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// An index resolved to an entry of the wrong kind, e.g. a tile slot
    /// pointing at a coordinate.
    #[error("constant pool entry {index} is {found:?}, expected {expected}")]
    UnexpectedEntry {
        index: PoolIndex,
        expected: &'static str,
        found: ConstantPoolType,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
