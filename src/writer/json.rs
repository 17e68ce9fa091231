//! Emit maps as JSON text.
//!
//! A `CompressedGameMap` serializes to the wire form
//! `{id, size, tileSize, constantPool: [{type, value}], tiles}`; a
//! `RawGameMap` to the loader format.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{MapError, Result};

pub fn to_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(MapError::Encode)
}

pub fn emit<T: Serialize>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    let text = to_string(value, pretty)?;
    fs::write(path, text).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}
