use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque tile identifier supplied by the caller.
pub type TileId = String;

/// Label selecting a (width, height) pair from a size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Xs,
    S,
    Ms,
    Ls,
    M,
    L,
}

impl SizeClass {
    /// Every class, in table-declaration order.
    pub const ALL: [SizeClass; 6] = [
        SizeClass::Xs,
        SizeClass::S,
        SizeClass::Ms,
        SizeClass::Ls,
        SizeClass::M,
        SizeClass::L,
    ];

    /// Lowercase wire label for the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Xs => "xs",
            SizeClass::S => "s",
            SizeClass::Ms => "ms",
            SizeClass::Ls => "ls",
            SizeClass::M => "m",
            SizeClass::L => "l",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input record: one tile awaiting placement.
///
/// Only these three fields participate in packing. Feeds commonly carry
/// placement placeholders (`x`, `y`, `width`, `height`) alongside them;
/// unknown fields are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub id: TileId,
    pub order: i64,
    pub size: SizeClass,
}

impl TileDescriptor {
    pub fn new(id: impl Into<TileId>, order: i64, size: SizeClass) -> Self {
        Self {
            id: id.into(),
            order,
            size,
        }
    }
}

/// Output record: a tile with concrete grid coordinates.
///
/// `index` is the tile's zero-based rank after ordering and doubles as a
/// stable render key downstream. Coordinates and dimensions are grid units;
/// rational values are carried exactly as computed, never rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub id: TileId,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parse a JSON array of tile descriptors (the dashboard feed shape).
pub fn parse_tiles(json: &str) -> Result<Vec<TileDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a tile feed from a JSON file.
pub fn load_tiles(path: impl AsRef<Path>) -> Result<Vec<TileDescriptor>> {
    let json = fs::read_to_string(path)?;
    parse_tiles(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_records_with_placeholder_fields() {
        let json = r#"[
            {"id":"0209b236","x":0,"y":0,"width":0,"height":0,"order":4,"size":"ms"},
            {"id":"bdabfb7e","x":0.7499673087075075,"y":0,"width":0,"height":0,"order":3,"size":"xs"}
        ]"#;
        let tiles = parse_tiles(json).unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0], TileDescriptor::new("0209b236", 4, SizeClass::Ms));
        assert_eq!(tiles[1], TileDescriptor::new("bdabfb7e", 3, SizeClass::Xs));
    }

    #[test]
    fn rejects_unknown_size_label() {
        let json = r#"[{"id":"a","order":0,"size":"xl"}]"#;
        assert!(parse_tiles(json).is_err());
    }

    #[test]
    fn loads_feed_from_disk() {
        let path = std::env::temp_dir().join("mosaic-load-tiles-test.json");
        fs::write(&path, r#"[{"id":"a","order":0,"size":"xs"}]"#).unwrap();

        let tiles = load_tiles(&path).unwrap();
        assert_eq!(tiles, vec![TileDescriptor::new("a", 0, SizeClass::Xs)]);

        fs::remove_file(&path).unwrap();
        assert!(load_tiles(&path).is_err());
    }

    #[test]
    fn size_class_labels_round_trip() {
        for class in SizeClass::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{class}\""));
            let back: SizeClass = serde_json::from_str(&json).unwrap();
            assert_eq!(back, class);
        }
    }

    #[test]
    fn placed_tile_serializes_with_stable_field_names() {
        let tile = PlacedTile {
            id: "a".to_string(),
            index: 0,
            x: 3.0,
            y: 0.0,
            width: 3.0,
            height: 2.0,
        };
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a","index":0,"x":3.0,"y":0.0,"width":3.0,"height":2.0}"#
        );
    }
}
