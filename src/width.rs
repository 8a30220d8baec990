//! Display width helpers for sketch labels.
//!
//! Sketch labels are plain text (tile ids or placement indexes), so width is
//! plain unicode display width with no escape-code handling.

/// Compute the display width of a label in character cells.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_bytes() {
        assert_eq!(display_width("tile-12"), 7);
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("タイル"), 6);
        assert_eq!(display_width("a漢b"), 4);
    }
}
