//! Size-class table - declarative tile dimensions in grid units.
//!
//! The standard table derives every class from the column count with fixed
//! divisors, so the same class scales across breakpoints. Custom tables can
//! reshape or omit classes; packing a tile whose class has no entry fails
//! validation instead of guessing.

use crate::tile::SizeClass;

use super::core::PackError;

/// Tile dimensions in grid units.
///
/// Values may be rational (a quarter of an odd column count, for instance)
/// and are used exactly as configured; the packer never rounds them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSize {
    pub width: f64,
    pub height: f64,
}

impl TileSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Immutable size-class lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeTable {
    entries: [Option<TileSize>; 6],
}

impl SizeTable {
    /// The standard table scaled to `columns` (c): xs c/4 x c/6, s c/4 x c/3,
    /// ms c/2 x c/3, ls c x c/3, m c/2 x c/2, l c x c/2.
    pub fn scaled(columns: u16) -> Result<Self, PackError> {
        if columns == 0 {
            return Err(PackError::InvalidColumnCount);
        }
        let c = f64::from(columns);
        Ok(Self::empty()
            .with(SizeClass::Xs, TileSize::new(c / 4.0, c / 6.0))
            .with(SizeClass::S, TileSize::new(c / 4.0, c / 3.0))
            .with(SizeClass::Ms, TileSize::new(c / 2.0, c / 3.0))
            .with(SizeClass::Ls, TileSize::new(c, c / 3.0))
            .with(SizeClass::M, TileSize::new(c / 2.0, c / 2.0))
            .with(SizeClass::L, TileSize::new(c, c / 2.0)))
    }

    /// Table with no entries; combine with [`SizeTable::with`].
    pub fn empty() -> Self {
        Self { entries: [None; 6] }
    }

    /// Builder-style entry insertion, replacing any existing entry.
    pub fn with(mut self, class: SizeClass, size: TileSize) -> Self {
        self.entries[class as usize] = Some(size);
        self
    }

    /// Look up the dimensions for a class, if the table maps it.
    pub fn get(&self, class: SizeClass) -> Option<TileSize> {
        self.entries[class as usize]
    }
}
