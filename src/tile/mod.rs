//! Tile data model orchestrator.
//!
//! Downstream code imports descriptor and placement types from here while
//! the implementation details live in the private `core` module.

mod core;

pub use core::{PlacedTile, SizeClass, TileDescriptor, TileId, load_tiles, parse_tiles};
