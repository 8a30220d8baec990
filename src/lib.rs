//! Deterministic tile packing for breakpoint-driven grid layouts.
//!
//! A feed of tile descriptors is sorted by rank and flowed onto a fixed
//! column grid with a single row-major cursor pass per breakpoint. Packing
//! is pure: identical feeds produce identical placements, which is what
//! lets the cache fingerprint a feed and skip repacking it.

pub mod breakpoints;
pub mod cache;
pub mod error;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod tile;
pub mod width;

pub use breakpoints::{Breakpoint, BreakpointCols, pack_breakpoints};
pub use cache::LayoutCache;
pub use error::{MosaicError, Result};
pub use layout::{Layout, LayoutStats, PackError, Packer, SizeTable, TileSize, WrapRule, pack};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, PackMetrics, snapshot_event};
pub use render::{SketchSettings, sketch_layout};
pub use tile::{PlacedTile, SizeClass, TileDescriptor, TileId, load_tiles, parse_tiles};
pub use width::display_width;
