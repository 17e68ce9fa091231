//! Loading maps from JSON text and from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{MapError, Result};
use crate::model::{CompressedGameMap, RawGameMap};

/// Source of raw maps by identifier.
pub trait MapLoader {
    fn load(&self, id: &str) -> Result<RawGameMap>;
}

/// Loads `<root>/<id>.json`. The tileset image `<id>-tileset.png` lives next
/// to it but is not read here.
#[derive(Debug, Clone)]
pub struct DirectoryMapLoader {
    root: PathBuf,
}

impl DirectoryMapLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl MapLoader for DirectoryMapLoader {
    fn load(&self, id: &str) -> Result<RawGameMap> {
        let path = self.path_for(id);
        let json = read(&path)?;
        let map = load_from_json(&json)?;
        if map.id != id {
            warn!(requested = id, found = %map.id, "map id does not match its file name");
        }
        Ok(map)
    }
}

fn read(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "file loaded");
    Ok(text)
}

/// Parse a raw map and check that `rawTiles` matches `size`.
pub fn load_from_json(json: &str) -> Result<RawGameMap> {
    let map: RawGameMap = serde_json::from_str(json)?;

    if map.size.is_degenerate() {
        return Err(MapError::ShapeMismatch {
            what: "rows of a zero-width map".to_string(),
            expected: 0,
            actual: map.size.height as usize,
        });
    }
    let height = map.size.height as usize;
    if map.raw_tiles.len() != height {
        return Err(MapError::ShapeMismatch {
            what: "rawTiles rows".to_string(),
            expected: height,
            actual: map.raw_tiles.len(),
        });
    }
    let width = map.size.width as usize;
    for (i, row) in map.raw_tiles.iter().enumerate() {
        if row.len() != width {
            return Err(MapError::ShapeMismatch {
                what: format!("rawTiles row {i}"),
                expected: width,
                actual: row.len(),
            });
        }
    }

    Ok(map)
}

/// Parse the wire form. The pool is not resolved until the map is
/// decompressed.
pub fn compressed_from_json(json: &str) -> Result<CompressedGameMap> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_compressed(path: &Path) -> Result<CompressedGameMap> {
    compressed_from_json(&read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstantPoolEntry, GameMap, GridSize, PixelSize, RawGameMapTileLayer};

    const TWO_BY_ONE: &str = r#"{
        "id": "pair",
        "size": {"width": 2, "height": 1},
        "tileSize": {"width": 16, "height": 16},
        "rawTiles": [[
            {"layers": [{"type": "staticImage", "coordinate": {"x": 0, "y": 0}, "abovePlayer": false}], "blocker": false},
            {"layers": [], "blocker": true}
        ]]
    }"#;

    #[test]
    fn test_load_raw_map() {
        let map = load_from_json(TWO_BY_ONE).unwrap();
        assert_eq!(map.id(), "pair");
        assert_eq!(map.size(), GridSize::new(2, 1));
        assert_eq!(map.raw_tiles[0][0].layers.len(), 1);
        assert!(map.raw_tiles[0][1].blocker);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let json = TWO_BY_ONE.replace(r#""width": 2"#, r#""width": 3"#);
        let err = load_from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            MapError::ShapeMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_width_rows_rejected() {
        let json = r#"{
            "id": "thin",
            "size": {"width": 0, "height": 2},
            "tileSize": {"width": 16, "height": 16},
            "rawTiles": [[], []]
        }"#;
        let err = load_from_json(json).unwrap_err();
        assert!(matches!(err, MapError::ShapeMismatch { actual: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_compressed_from_json() {
        let json = r#"{
            "id": "a",
            "size": {"width": 1, "height": 1},
            "tileSize": {"width": 8, "height": 8},
            "constantPool": [
                {"type": 3, "value": [2]},
                {"type": 6, "value": 3},
                {"type": 1, "value": {"x": 0, "y": 0}}
            ],
            "tiles": [1]
        }"#;
        let map = compressed_from_json(json).unwrap();
        assert_eq!(map.constant_pool().len(), 3);
        assert_eq!(
            map.constant_pool()[1],
            ConstantPoolEntry::StaticImageLayer {
                coordinate: 3,
                above_player: false
            }
        );
        assert_eq!(map.tiles(), &[1]);
    }

    #[test]
    fn test_negative_duration_parses() {
        let json = r#"{
            "id": "a",
            "size": {"width": 1, "height": 1},
            "tileSize": {"width": 8, "height": 8},
            "constantPool": [
                {"type": 3, "value": [2]},
                {"type": 7, "value": [3]},
                {"type": 8, "value": {"coordinate": {"x": 1, "y": 0}, "duration": -5}}
            ],
            "tiles": [1]
        }"#;
        let map = compressed_from_json(json).unwrap();
        let raw = map.raw_game_map().unwrap();
        let RawGameMapTileLayer::Animation(layer) = &raw.raw_tiles[0][0].layers[0] else {
            panic!("animation layer expected");
        };
        assert_eq!(layer.frames[0].duration, -5);
    }

    #[test]
    fn test_huge_pixel_size_does_not_panic() {
        let json = r#"{
            "id": "wide",
            "size": {"width": 70000, "height": 0},
            "tileSize": {"width": 70000, "height": 16},
            "constantPool": [],
            "tiles": []
        }"#;
        let map = compressed_from_json(json).unwrap();
        assert_eq!(map.pixel_size(), PixelSize::new(70_000u32.wrapping_mul(70_000), 0));
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let json = r#"{
            "id": "a",
            "size": {"width": 1, "height": 1},
            "tileSize": {"width": 8, "height": 8},
            "constantPool": [{"type": 9, "value": 1}],
            "tiles": [1]
        }"#;
        let err = compressed_from_json(json).unwrap_err();
        assert!(matches!(err, MapError::MalformedWireInput(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_file() {
        let loader = DirectoryMapLoader::new("/definitely/not/here");
        let err = loader.load("town").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
        assert!(err.to_string().contains("town.json"));
    }
}
