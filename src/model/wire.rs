//! `{type, value}` encoding of constant pool entries.
//!
//! The wire form carries no variant names, only the numeric tag; the payload
//! shape is selected by the tag alone:
//!
//! | tag  | payload                         |
//! |------|---------------------------------|
//! | 1    | `{x, y}`                        |
//! | 2, 3 | `[int]` layer indices           |
//! | 4, 6 | `int` coordinate index          |
//! | 5, 7 | `[int]` frame indices           |
//! | 8    | `{coordinate: {x, y}, duration}` |

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::compressed::{ConstantPoolEntry, ConstantPoolType};

impl ConstantPoolType {
    /// Build the entry for this tag from its JSON payload.
    pub fn reconstruct(self, value: Value) -> serde_json::Result<ConstantPoolEntry> {
        use serde_json::from_value;
        let entry = match self {
            Self::Coordinate => ConstantPoolEntry::Coordinate(from_value(value)?),
            Self::BlockingTile | Self::NonBlockingTile => ConstantPoolEntry::Tile {
                layers: from_value(value)?,
                blocker: self == Self::BlockingTile,
            },
            Self::StaticImageLayerAbove | Self::StaticImageLayerBelow => {
                ConstantPoolEntry::StaticImageLayer {
                    coordinate: from_value(value)?,
                    above_player: self == Self::StaticImageLayerAbove,
                }
            }
            Self::AnimationLayerAbove | Self::AnimationLayerBelow => {
                ConstantPoolEntry::AnimationLayer {
                    frames: from_value(value)?,
                    above_player: self == Self::AnimationLayerAbove,
                }
            }
            Self::AnimationFrame => ConstantPoolEntry::AnimationFrame(from_value(value)?),
        };
        Ok(entry)
    }
}

impl Serialize for ConstantPoolEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConstantPoolEntry", 2)?;
        state.serialize_field("type", &self.entry_type().tag())?;
        match self {
            Self::Coordinate(coordinate) => state.serialize_field("value", coordinate)?,
            Self::Tile { layers, .. } => state.serialize_field("value", layers)?,
            Self::StaticImageLayer { coordinate, .. } => state.serialize_field("value", coordinate)?,
            Self::AnimationLayer { frames, .. } => state.serialize_field("value", frames)?,
            Self::AnimationFrame(frame) => state.serialize_field("value", frame)?,
        }
        state.end()
    }
}

/// Payload is kept as a raw `Value` until the tag is known.
#[derive(Deserialize)]
struct WireEntry {
    #[serde(rename = "type")]
    tag: i64,
    value: Value,
}

impl<'de> Deserialize<'de> for ConstantPoolEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let WireEntry { tag, value } = WireEntry::deserialize(deserializer)?;
        let ty = ConstantPoolType::from_tag(tag)
            .ok_or_else(|| D::Error::custom(format_args!("unknown constant pool type {tag}")))?;
        ty.reconstruct(value)
            .map_err(|e| D::Error::custom(format_args!("bad payload for type {tag}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{GridCoordinate, RawTileAnimationFrame};

    fn decode(value: Value) -> serde_json::Result<ConstantPoolEntry> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_encode_every_shape() {
        let cases = [
            (
                ConstantPoolEntry::Coordinate(GridCoordinate::new(4, 2)),
                json!({"type": 1, "value": {"x": 4, "y": 2}}),
            ),
            (
                ConstantPoolEntry::Tile {
                    layers: vec![2, 5],
                    blocker: true,
                },
                json!({"type": 2, "value": [2, 5]}),
            ),
            (
                ConstantPoolEntry::Tile {
                    layers: vec![],
                    blocker: false,
                },
                json!({"type": 3, "value": []}),
            ),
            (
                ConstantPoolEntry::StaticImageLayer {
                    coordinate: 9,
                    above_player: true,
                },
                json!({"type": 4, "value": 9}),
            ),
            (
                ConstantPoolEntry::AnimationLayer {
                    frames: vec![3, 4],
                    above_player: true,
                },
                json!({"type": 5, "value": [3, 4]}),
            ),
            (
                ConstantPoolEntry::StaticImageLayer {
                    coordinate: 1,
                    above_player: false,
                },
                json!({"type": 6, "value": 1}),
            ),
            (
                ConstantPoolEntry::AnimationLayer {
                    frames: vec![8],
                    above_player: false,
                },
                json!({"type": 7, "value": [8]}),
            ),
            (
                ConstantPoolEntry::AnimationFrame(RawTileAnimationFrame {
                    coordinate: GridCoordinate::new(1, 0),
                    duration: 100,
                }),
                json!({"type": 8, "value": {"coordinate": {"x": 1, "y": 0}, "duration": 100}}),
            ),
        ];

        for (entry, expected) in cases {
            assert_eq!(serde_json::to_value(&entry).unwrap(), expected);
            assert_eq!(decode(expected).unwrap(), entry);
        }
    }

    #[test]
    fn test_negative_frame_duration() {
        let value = json!({"type": 8, "value": {"coordinate": {"x": 1, "y": 0}, "duration": -5}});
        let entry = decode(value.clone()).unwrap();
        assert_eq!(
            entry,
            ConstantPoolEntry::AnimationFrame(RawTileAnimationFrame {
                coordinate: GridCoordinate::new(1, 0),
                duration: -5,
            })
        );
        assert_eq!(serde_json::to_value(&entry).unwrap(), value);
    }

    #[test]
    fn test_type_field_may_come_last() {
        let entry = decode(json!({"value": [1, 2], "type": 3})).unwrap();
        assert_eq!(
            entry,
            ConstantPoolEntry::Tile {
                layers: vec![1, 2],
                blocker: false
            }
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode(json!({"type": 9, "value": 1})).unwrap_err();
        assert!(err.to_string().contains("unknown constant pool type 9"), "got: {err}");
        assert!(decode(json!({"type": 0, "value": 1})).is_err());
    }

    #[test]
    fn test_payload_must_match_tag() {
        // a coordinate payload under a tile tag
        assert!(decode(json!({"type": 2, "value": {"x": 0, "y": 0}})).is_err());
        // a list where a single index is expected
        assert!(decode(json!({"type": 4, "value": [1]})).is_err());
        // negative indices are never valid
        assert!(decode(json!({"type": 5, "value": [-1]})).is_err());
        assert!(decode(json!({"type": 8, "value": {"x": 0, "y": 0}})).is_err());
        assert!(decode(json!({"type": 1})).is_err());
    }
}
