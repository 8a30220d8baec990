//! Overflow Probe
//!
//! Feeds a quarter/quarter/quarter/half sequence through both wrap rules
//! on a 12-column grid. Under the exact-fit rule the half-width tile pushes
//! the cursor past the edge and the row never closes again, so every later
//! tile marches further off-grid. The overflow rule wraps it onto a new row
//! instead.
//!
//! ```bash
//! cargo run --example overflow_probe
//! ```

use mosaic::{Packer, SizeClass, SketchSettings, TileDescriptor, WrapRule, sketch_layout};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let feed = vec![
        TileDescriptor::new("q1", 0, SizeClass::Xs),
        TileDescriptor::new("q2", 1, SizeClass::Xs),
        TileDescriptor::new("q3", 2, SizeClass::Xs),
        TileDescriptor::new("wide", 3, SizeClass::Ms),
        TileDescriptor::new("tail", 4, SizeClass::Xs),
        TileDescriptor::new("banner", 5, SizeClass::Ls),
    ];

    for wrap in [WrapRule::ExactFit, WrapRule::Overflow] {
        let layout = Packer::new(12)?.with_wrap(wrap).pack(&feed)?;
        let stats = layout.stats();

        println!(
            "== {:?}: {} row breaks, height {:.1}{} ==",
            wrap,
            stats.rows_closed,
            stats.height,
            if stats.overshot { ", overshot" } else { "" }
        );
        for tile in layout.iter() {
            println!(
                "  {:<6} {:>2}x{:<2} at ({:>4.1}, {:>4.1})",
                tile.id, tile.width, tile.height, tile.x, tile.y
            );
        }
        println!(
            "{}\n",
            sketch_layout(
                &layout,
                &SketchSettings {
                    label_ids: true,
                    ..SketchSettings::default()
                }
            )
        );
    }

    Ok(())
}
