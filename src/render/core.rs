use crate::display_width;
use crate::layout::Layout;

/// Sketch scale and labelling parameters.
#[derive(Debug, Clone)]
pub struct SketchSettings {
    /// Characters per grid unit horizontally.
    pub cell_width: u16,
    /// Rows per grid unit vertically.
    pub cell_height: u16,
    /// Label boxes with tile ids instead of placement indices.
    pub label_ids: bool,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            cell_width: 4,
            cell_height: 2,
            label_ids: false,
        }
    }
}

/// Draw a layout as ASCII boxes on a character canvas.
///
/// Tiles are painted in placement order, so overlapping placements show the
/// later tile on top. A `:` rail marks the grid's right edge wherever no box
/// covers it; tiles that overshoot the edge visibly straddle the rail.
/// Coordinates are rounded to the canvas scale for display only, and boxes
/// too small to draw at that scale are skipped.
pub fn sketch_layout(layout: &Layout, settings: &SketchSettings) -> String {
    if layout.is_empty() {
        return String::new();
    }

    let cell_width = f64::from(settings.cell_width.max(1));
    let cell_height = f64::from(settings.cell_height.max(1));
    let scale_x = |units: f64| (units * cell_width).round() as usize;
    let scale_y = |units: f64| (units * cell_height).round() as usize;

    let edge_col = scale_x(layout.columns());
    let mut rows = 0;
    let mut cols = edge_col + 1;
    for tile in layout.iter() {
        rows = rows.max(scale_y(tile.y + tile.height));
        cols = cols.max(scale_x(tile.x + tile.width));
    }
    if rows == 0 {
        return String::new();
    }

    let mut canvas = vec![vec![' '; cols]; rows];

    for tile in layout.iter() {
        let x0 = scale_x(tile.x);
        let x1 = scale_x(tile.x + tile.width);
        let y0 = scale_y(tile.y);
        let y1 = scale_y(tile.y + tile.height);
        if x1 < x0 + 2 || y1 < y0 + 2 {
            continue;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let top = y == y0;
                let bottom = y == y1 - 1;
                let left = x == x0;
                let right = x == x1 - 1;
                canvas[y][x] = if (top || bottom) && (left || right) {
                    '+'
                } else if top || bottom {
                    '-'
                } else if left || right {
                    '|'
                } else {
                    ' '
                };
            }
        }

        let label = if settings.label_ids {
            tile.id.clone()
        } else {
            tile.index.to_string()
        };
        // Inside the box when there is an interior row, on the top border
        // otherwise.
        let row = if y1 - y0 >= 3 { y0 + 1 } else { y0 };
        let mut col = x0 + if row == y0 { 1 } else { 2 };
        for glyph in label.chars() {
            let mut buf = [0u8; 4];
            let width = display_width(glyph.encode_utf8(&mut buf)).max(1);
            if col + width > x1 - 1 {
                break;
            }
            canvas[row][col] = glyph;
            // Wide glyphs occupy two display columns; mark the second cell
            // so it is dropped from the output line.
            for extra in 1..width {
                canvas[row][col + extra] = '\0';
            }
            col += width;
        }
    }

    for row in &mut canvas {
        if row[edge_col] == ' ' {
            row[edge_col] = ':';
        }
    }

    canvas
        .iter()
        .map(|row| {
            let line: String = row.iter().filter(|cell| **cell != '\0').collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
