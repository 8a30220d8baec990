//! Named column counts and multi-breakpoint packing.

use std::collections::BTreeMap;

use crate::layout::{Layout, PackError, Packer, WrapRule};
use crate::tile::TileDescriptor;

pub type Breakpoint = String;

/// Ordered breakpoint-to-column-count assignments.
///
/// The default set mirrors the usual responsive ladder: `lg` and `md` at 12
/// columns, `sm` at 6, `xs` at 4, `xxs` at 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointCols {
    entries: Vec<(Breakpoint, u16)>,
}

impl BreakpointCols {
    /// Empty set; populate with [`BreakpointCols::with_breakpoint`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a breakpoint, replacing any existing entry with the same label.
    pub fn with_breakpoint(mut self, label: impl Into<Breakpoint>, columns: u16) -> Self {
        let label = label.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == label) {
            entry.1 = columns;
        } else {
            self.entries.push((label, columns));
        }
        self
    }

    pub fn get(&self, label: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, columns)| *columns)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.entries
            .iter()
            .map(|(name, columns)| (name.as_str(), *columns))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BreakpointCols {
    fn default() -> Self {
        Self::new()
            .with_breakpoint("lg", 12)
            .with_breakpoint("md", 12)
            .with_breakpoint("sm", 6)
            .with_breakpoint("xs", 4)
            .with_breakpoint("xxs", 2)
    }
}

/// Pack the same tile feed once per breakpoint.
///
/// Every layout is produced from the standard size table scaled to that
/// breakpoint's column count. A failure at any breakpoint fails the whole
/// call and returns no layouts.
pub fn pack_breakpoints(
    tiles: &[TileDescriptor],
    breakpoints: &BreakpointCols,
    wrap: WrapRule,
) -> Result<BTreeMap<Breakpoint, Layout>, PackError> {
    let mut layouts = BTreeMap::new();
    for (label, columns) in breakpoints.iter() {
        let layout = Packer::new(columns)?.with_wrap(wrap).pack(tiles)?;
        layouts.insert(label.to_string(), layout);
    }
    Ok(layouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::SizeClass;

    #[test]
    fn default_ladder_matches_expected_columns() {
        let set = BreakpointCols::default();
        assert_eq!(set.len(), 5);
        assert_eq!(set.get("lg"), Some(12));
        assert_eq!(set.get("md"), Some(12));
        assert_eq!(set.get("sm"), Some(6));
        assert_eq!(set.get("xs"), Some(4));
        assert_eq!(set.get("xxs"), Some(2));
    }

    #[test]
    fn duplicate_label_replaces_in_place() {
        let set = BreakpointCols::new()
            .with_breakpoint("lg", 12)
            .with_breakpoint("sm", 6)
            .with_breakpoint("lg", 10);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("lg"), Some(10));
        let labels: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(labels, vec!["lg", "sm"]);
    }

    #[test]
    fn packs_every_breakpoint_with_scaled_tables() {
        let tiles = [
            TileDescriptor::new("a", 0, SizeClass::Xs),
            TileDescriptor::new("b", 1, SizeClass::M),
        ];
        let layouts =
            pack_breakpoints(&tiles, &BreakpointCols::default(), WrapRule::ExactFit).unwrap();

        assert_eq!(layouts.len(), 5);
        assert_eq!(layouts["lg"].columns(), 12.0);
        assert_eq!(layouts["xxs"].columns(), 2.0);

        // Dimensions scale with the column count.
        assert_eq!(layouts["lg"].get("a").unwrap().width, 3.0);
        assert_eq!(layouts["sm"].get("a").unwrap().width, 1.5);
        assert_eq!(layouts["xxs"].get("a").unwrap().width, 0.5);
        assert_eq!(layouts["xxs"].get("a").unwrap().height, 2.0 / 6.0);
    }

    #[test]
    fn bad_breakpoint_fails_the_whole_set() {
        let set = BreakpointCols::new()
            .with_breakpoint("lg", 12)
            .with_breakpoint("broken", 0);
        let err = pack_breakpoints(&[], &set, WrapRule::ExactFit).unwrap_err();
        assert_eq!(err, PackError::InvalidColumnCount);
    }

    #[test]
    fn empty_set_packs_to_empty_map() {
        let layouts =
            pack_breakpoints(&[], &BreakpointCols::new(), WrapRule::ExactFit).unwrap();
        assert!(layouts.is_empty());
    }
}
