//! Layout module orchestrator.
//!
//! Downstream crates and demos import packing types from here while the
//! implementation details live in the private `core` module.

mod core;
pub mod sizes;

pub use core::{Layout, LayoutStats, PackError, Packer, WrapRule, pack};
pub use sizes::{SizeTable, TileSize};
