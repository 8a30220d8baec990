use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tile::{PlacedTile, SizeClass, TileDescriptor};

use super::sizes::{SizeTable, TileSize};

/// Errors surfaced by pack validation.
///
/// Every variant is detected before the first tile is placed; a failing pack
/// emits nothing. Identical input always produces the identical error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackError {
    /// The tile's class has no entry in the size table.
    #[error("size class `{0}` has no entry in the size table")]
    InvalidSizeClass(SizeClass),
    /// Zero columns cannot host any tile.
    #[error("column count must be a positive number of grid units")]
    InvalidColumnCount,
    /// The class is wider than the whole grid, so its row could never close.
    #[error("size class `{class}` is {width} grid units wide but the grid has {columns} columns")]
    TileTooWide {
        class: SizeClass,
        width: f64,
        columns: u16,
    },
}

/// Row-wrap rule applied while the cursor walks the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapRule {
    /// Wrap only when accumulated widths land on the column edge exactly.
    ///
    /// This is the historical rule. A width that does not divide the
    /// remaining row evenly pushes the cursor past the edge, and once past
    /// it the row never closes again: every later tile is placed further
    /// off-grid to the right. With the standard table's quarter/half/full
    /// widths, three quarters followed by a half is enough to trigger it.
    /// Consumers that rely on the exact placement sequence get it unchanged;
    /// callers that want the cursor to recover opt into
    /// [`WrapRule::Overflow`].
    #[default]
    ExactFit,
    /// Wrap before placing any tile that would cross the column edge.
    ///
    /// A new row starts at the bottom of the tallest tile placed in the
    /// closing row, so overflow layouts neither overlap nor run off-grid.
    Overflow,
}

/// Immutable packing configuration: column count, size table, wrap rule.
#[derive(Debug, Clone)]
pub struct Packer {
    columns: u16,
    table: SizeTable,
    wrap: WrapRule,
}

impl Packer {
    /// Packer over the standard size table scaled to `columns`.
    pub fn new(columns: u16) -> Result<Self, PackError> {
        let table = SizeTable::scaled(columns)?;
        Ok(Self {
            columns,
            table,
            wrap: WrapRule::default(),
        })
    }

    /// Packer over a caller-supplied table.
    pub fn with_table(columns: u16, table: SizeTable) -> Result<Self, PackError> {
        if columns == 0 {
            return Err(PackError::InvalidColumnCount);
        }
        Ok(Self {
            columns,
            table,
            wrap: WrapRule::default(),
        })
    }

    /// Select the row-wrap rule (defaults to [`WrapRule::ExactFit`]).
    pub fn with_wrap(mut self, wrap: WrapRule) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn wrap(&self) -> WrapRule {
        self.wrap
    }

    /// Place every descriptor on the grid.
    ///
    /// Descriptors are processed in ascending `order`; equal orders keep
    /// their relative input positions. The returned layout lists tiles in
    /// placement order. The input slice is never mutated, and identical
    /// input always yields an identical layout.
    pub fn pack(&self, tiles: &[TileDescriptor]) -> Result<Layout, PackError> {
        let columns = f64::from(self.columns);

        // Validate the whole input up front so a bad tile fails the call
        // before anything is placed.
        let mut sized: Vec<(&TileDescriptor, TileSize)> = Vec::with_capacity(tiles.len());
        for tile in tiles {
            let size = self
                .table
                .get(tile.size)
                .ok_or(PackError::InvalidSizeClass(tile.size))?;
            if size.width > columns {
                return Err(PackError::TileTooWide {
                    class: tile.size,
                    width: size.width,
                    columns: self.columns,
                });
            }
            sized.push((tile, size));
        }

        // Stable: ties keep input order.
        sized.sort_by(|a, b| a.0.order.cmp(&b.0.order));

        let mut placed = Vec::with_capacity(sized.len());
        let mut x = 0.0_f64;
        let mut y = 0.0_f64;
        let mut row_bottom = 0.0_f64;

        for (index, (tile, size)) in sized.into_iter().enumerate() {
            if self.wrap == WrapRule::Overflow && x > 0.0 && x + size.width > columns {
                x = 0.0;
                y = row_bottom;
            }

            placed.push(PlacedTile {
                id: tile.id.clone(),
                index,
                x,
                y,
                width: size.width,
                height: size.height,
            });

            row_bottom = row_bottom.max(y + size.height);
            x += size.width;
            // An exact landing on the edge closes the row; an overshoot
            // does not.
            if x == columns {
                x = 0.0;
                y = match self.wrap {
                    WrapRule::ExactFit => y + size.height,
                    WrapRule::Overflow => row_bottom,
                };
            }
        }

        Ok(Layout {
            columns,
            tiles: placed,
        })
    }
}

/// Pack `tiles` onto a `columns`-wide grid with the standard size table and
/// the default wrap rule.
pub fn pack(tiles: &[TileDescriptor], columns: u16) -> Result<Layout, PackError> {
    Packer::new(columns)?.pack(tiles)
}

/// A packed arrangement: placement-ordered tiles plus the column count they
/// were packed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    columns: f64,
    tiles: Vec<PlacedTile>,
}

impl Layout {
    /// Tiles in placement order.
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Column count the layout was packed against.
    pub fn columns(&self) -> f64 {
        self.columns
    }

    /// Find a tile by id.
    pub fn get(&self, id: &str) -> Option<&PlacedTile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedTile> {
        self.tiles.iter()
    }

    /// Derived placement statistics.
    pub fn stats(&self) -> LayoutStats {
        let rows_closed = self
            .tiles
            .windows(2)
            .filter(|pair| pair[1].y != pair[0].y)
            .count();
        let overshot = self
            .tiles
            .iter()
            .any(|tile| tile.x + tile.width > self.columns);
        let height = self
            .tiles
            .iter()
            .map(|tile| tile.y + tile.height)
            .fold(0.0_f64, f64::max);
        LayoutStats {
            tiles: self.tiles.len(),
            rows_closed,
            overshot,
            height,
        }
    }

    /// Deterministic digest of the placement.
    ///
    /// Two packs of identical input hash identically; any change to an id,
    /// rank or coordinate changes the digest.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.columns.to_le_bytes());
        for tile in &self.tiles {
            // Ids are length-prefixed so frames stay self-delimiting.
            hasher.update(&(tile.id.len() as u64).to_le_bytes());
            hasher.update(tile.id.as_bytes());
            hasher.update(&(tile.index as u64).to_le_bytes());
            hasher.update(&tile.x.to_le_bytes());
            hasher.update(&tile.y.to_le_bytes());
            hasher.update(&tile.width.to_le_bytes());
            hasher.update(&tile.height.to_le_bytes());
        }
        hasher.finalize()
    }
}

/// Summary numbers derived from a packed layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStats {
    pub tiles: usize,
    /// Row transitions between consecutively placed tiles.
    pub rows_closed: usize,
    /// Whether any tile extends past the column edge (the exact-fit rule's
    /// overshoot condition).
    pub overshot: bool,
    /// Bottom edge of the lowest tile, in grid units.
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: &str, order: i64, size: SizeClass) -> TileDescriptor {
        TileDescriptor::new(id, order, size)
    }

    #[test]
    fn orders_before_placing() {
        let layout = pack(
            &[
                tile("a", 1, SizeClass::Xs),
                tile("b", 0, SizeClass::Xs),
            ],
            12,
        )
        .unwrap();

        let tiles = layout.tiles();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].id, "b");
        assert_eq!(tiles[0].index, 0);
        assert_eq!((tiles[0].x, tiles[0].y), (0.0, 0.0));
        assert_eq!((tiles[0].width, tiles[0].height), (3.0, 2.0));
        assert_eq!(tiles[1].id, "a");
        assert_eq!(tiles[1].index, 1);
        assert_eq!((tiles[1].x, tiles[1].y), (3.0, 0.0));
        assert_eq!((tiles[1].width, tiles[1].height), (3.0, 2.0));
    }

    #[test]
    fn preserves_cardinality_and_ids() {
        let input: Vec<_> = SizeClass::ALL
            .iter()
            .enumerate()
            .map(|(i, class)| tile(&format!("t{i}"), (7 - i) as i64, *class))
            .collect();

        let layout = pack(&input, 12).unwrap();
        assert_eq!(layout.len(), input.len());
        for descriptor in &input {
            assert!(layout.get(&descriptor.id).is_some());
        }
    }

    #[test]
    fn equal_orders_keep_input_positions() {
        let layout = pack(
            &[
                tile("first", 5, SizeClass::Xs),
                tile("second", 5, SizeClass::Xs),
                tile("third", 5, SizeClass::Xs),
                tile("leader", 0, SizeClass::Xs),
            ],
            12,
        )
        .unwrap();

        let ids: Vec<_> = layout.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["leader", "first", "second", "third"]);
    }

    #[test]
    fn full_width_rows_stack() {
        // ls is full-width with height columns/3.
        let layout = pack(
            &[tile("a", 0, SizeClass::Ls), tile("b", 1, SizeClass::Ls)],
            12,
        )
        .unwrap();
        assert_eq!((layout.tiles()[0].x, layout.tiles()[0].y), (0.0, 0.0));
        assert_eq!((layout.tiles()[1].x, layout.tiles()[1].y), (0.0, 4.0));

        // l is full-width with height columns/2.
        let layout = pack(
            &[tile("a", 0, SizeClass::L), tile("b", 1, SizeClass::L)],
            12,
        )
        .unwrap();
        assert_eq!((layout.tiles()[0].x, layout.tiles()[0].y), (0.0, 0.0));
        assert_eq!((layout.tiles()[1].x, layout.tiles()[1].y), (0.0, 6.0));
    }

    #[test]
    fn half_width_pairs_close_the_row() {
        let layout = pack(
            &[
                tile("a", 0, SizeClass::M),
                tile("b", 1, SizeClass::M),
                tile("c", 2, SizeClass::M),
            ],
            12,
        )
        .unwrap();
        assert_eq!((layout.tiles()[0].x, layout.tiles()[0].y), (0.0, 0.0));
        assert_eq!((layout.tiles()[1].x, layout.tiles()[1].y), (6.0, 0.0));
        assert_eq!((layout.tiles()[2].x, layout.tiles()[2].y), (0.0, 6.0));
        assert!(!layout.stats().overshot);
    }

    #[test]
    fn overshoot_never_recovers_under_exact_fit() {
        // Three quarters leave the cursor at 9; the half-width tile pushes
        // it to 15 and the row never closes again.
        let layout = pack(
            &[
                tile("q1", 0, SizeClass::Xs),
                tile("q2", 1, SizeClass::Xs),
                tile("q3", 2, SizeClass::Xs),
                tile("wide", 3, SizeClass::Ms),
                tile("stranded", 4, SizeClass::Xs),
            ],
            12,
        )
        .unwrap();

        let tiles = layout.tiles();
        assert_eq!((tiles[3].x, tiles[3].y), (9.0, 0.0));
        assert_eq!((tiles[4].x, tiles[4].y), (15.0, 0.0));

        let stats = layout.stats();
        assert!(stats.overshot);
        assert_eq!(stats.rows_closed, 0);
    }

    #[test]
    fn overflow_rule_wraps_before_crossing() {
        let layout = Packer::new(12)
            .unwrap()
            .with_wrap(WrapRule::Overflow)
            .pack(&[
                tile("q1", 0, SizeClass::Xs),
                tile("q2", 1, SizeClass::Xs),
                tile("q3", 2, SizeClass::Xs),
                tile("wide", 3, SizeClass::Ms),
                tile("next", 4, SizeClass::Xs),
            ])
            .unwrap();

        let tiles = layout.tiles();
        // The half-width tile would cross the edge at x=9, so it opens the
        // next row below the quarter tiles instead.
        assert_eq!((tiles[3].x, tiles[3].y), (0.0, 2.0));
        assert_eq!((tiles[4].x, tiles[4].y), (6.0, 2.0));
        assert!(!layout.stats().overshot);
    }

    #[test]
    fn exact_fit_closes_rows_by_last_height() {
        // m (6x6) then ms (6x4) close the row exactly; the historical rule
        // advances by the closing tile's height, tucking the next row under
        // the taller neighbor.
        let feed = [
            tile("tall", 0, SizeClass::M),
            tile("short", 1, SizeClass::Ms),
            tile("below", 2, SizeClass::Xs),
        ];

        let exact = pack(&feed, 12).unwrap();
        assert_eq!(exact.tiles()[2].y, 4.0);

        let overflow = Packer::new(12)
            .unwrap()
            .with_wrap(WrapRule::Overflow)
            .pack(&feed)
            .unwrap();
        assert_eq!(overflow.tiles()[2].y, 6.0);
    }

    #[test]
    fn packer_reports_columns_and_wrap_rule() {
        let packer = Packer::new(12).unwrap();
        assert_eq!(packer.columns(), 12);
        assert_eq!(packer.wrap(), WrapRule::ExactFit);

        let packer = packer.with_wrap(WrapRule::Overflow);
        assert_eq!(packer.wrap(), WrapRule::Overflow);
        assert_eq!(packer.columns(), 12);
    }

    #[test]
    fn packing_is_pure() {
        let feed: Vec<_> = (0..24)
            .map(|i| tile(&format!("t{i}"), (24 - i) as i64, SizeClass::ALL[i % 6]))
            .collect();

        let first = pack(&feed, 12).unwrap();
        let second = pack(&feed, 12).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn empty_input_packs_to_empty_layout() {
        let layout = pack(&[], 12).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.stats().height, 0.0);
    }

    #[test]
    fn unmapped_class_fails_before_placement() {
        let table = SizeTable::empty().with(SizeClass::M, TileSize::new(6.0, 6.0));
        let packer = Packer::with_table(12, table).unwrap();
        let err = packer
            .pack(&[tile("a", 0, SizeClass::M), tile("b", 1, SizeClass::Xs)])
            .unwrap_err();
        assert_eq!(err, PackError::InvalidSizeClass(SizeClass::Xs));
    }

    #[test]
    fn zero_columns_is_rejected() {
        assert_eq!(pack(&[], 0).unwrap_err(), PackError::InvalidColumnCount);
        assert_eq!(Packer::new(0).unwrap_err(), PackError::InvalidColumnCount);
    }

    #[test]
    fn oversized_class_is_rejected() {
        let table = SizeTable::empty().with(SizeClass::L, TileSize::new(13.0, 6.0));
        let packer = Packer::with_table(12, table).unwrap();
        let err = packer.pack(&[tile("a", 0, SizeClass::L)]).unwrap_err();
        assert_eq!(
            err,
            PackError::TileTooWide {
                class: SizeClass::L,
                width: 13.0,
                columns: 12,
            }
        );
    }

    #[test]
    fn oversized_class_without_tiles_is_fine() {
        // The too-wide check covers classes actually present in the input.
        let table = SizeTable::empty()
            .with(SizeClass::L, TileSize::new(13.0, 6.0))
            .with(SizeClass::Xs, TileSize::new(3.0, 2.0));
        let packer = Packer::with_table(12, table).unwrap();
        assert!(packer.pack(&[tile("a", 0, SizeClass::Xs)]).is_ok());
    }

    #[test]
    fn layout_round_trips_through_json() {
        let layout = pack(
            &[tile("a", 1, SizeClass::Xs), tile("b", 0, SizeClass::M)],
            12,
        )
        .unwrap();

        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.starts_with(r#"{"columns":12.0,"tiles":["#));

        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn fingerprint_tracks_placement_changes() {
        let base = pack(&[tile("a", 0, SizeClass::Xs)], 12).unwrap();
        let moved = pack(&[tile("a", 1, SizeClass::Xs)], 12).unwrap();
        // Same placement either way (single tile), same digest.
        assert_eq!(base.fingerprint(), moved.fingerprint());

        let renamed = pack(&[tile("b", 0, SizeClass::Xs)], 12).unwrap();
        assert_ne!(base.fingerprint(), renamed.fingerprint());

        let resized = pack(&[tile("a", 0, SizeClass::S)], 12).unwrap();
        assert_ne!(base.fingerprint(), resized.fingerprint());
    }

    #[test]
    fn nul_bytes_in_ids_do_not_alias_fingerprints() {
        let twin = pack(
            &[tile("p", 0, SizeClass::Xs), tile("q", 1, SizeClass::Xs)],
            12,
        )
        .unwrap();

        // A single tile whose id spells out the first twin tile's digest
        // fields, byte for byte, in front of the second id.
        let mut spliced = String::from("p\0");
        for byte in 0_u64.to_le_bytes() {
            spliced.push(char::from(byte));
        }
        for value in [0.0_f64, 0.0, 3.0, 2.0] {
            for byte in value.to_le_bytes() {
                spliced.push(char::from(byte));
            }
        }
        spliced.push('q');

        let solo: Layout = serde_json::from_value(serde_json::json!({
            "columns": 12.0,
            "tiles": [
                {"id": spliced, "index": 1, "x": 3.0, "y": 0.0, "width": 3.0, "height": 2.0},
            ]
        }))
        .unwrap();

        assert_ne!(solo.len(), twin.len());
        assert_ne!(twin.fingerprint(), solo.fingerprint());
    }
}
