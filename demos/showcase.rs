//! Tile Feed Showcase
//!
//! Packs a captured 33-tile feed across the default breakpoint ladder and
//! prints what a grid consumer would see: per-breakpoint stats, an ASCII
//! sketch of the `lg` arrangement, and the `lg` layouts map as JSON.
//! Sync events and a metrics snapshot land in a JSONL log under the
//! system temp directory.
//!
//! ```bash
//! cargo run --example showcase
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use mosaic::logging::FileSink;
use mosaic::{
    BreakpointCols, LayoutCache, Logger, PackMetrics, PlacedTile, SketchSettings, parse_tiles,
    sketch_layout, snapshot_event,
};

const TILE_FEED: &str = r#"[
  {"id":"0209b236-85da-4ba4-b987-c980ccb109f5","x":0,"y":0,"width":0,"height":0,"order":4,"size":"ms"},
  {"id":"7475d5bf-6d67-478f-8f1b-1c11779ac30d","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":22,"size":"ms"},
  {"id":"589e8b93-64ce-43ff-b37a-03d760f954f9","x":0,"y":0,"width":0,"height":0,"order":21,"size":"ms"},
  {"id":"c767a188-9fb9-47b4-849a-8dbfc76e56ee","x":0,"y":0,"width":0,"height":0,"order":18,"size":"ls"},
  {"id":"bdabfb7e-50a9-4ea9-b06e-6e06250ef736","x":0.7499673087075075,"y":0,"width":0,"height":0,"order":3,"size":"xs"},
  {"id":"10500bc2-68cd-48ea-8b2f-2ef826e01198","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":11,"size":"ms"},
  {"id":"e0e7c53e-09da-46d4-835b-f2b7821c5db6","x":0,"y":0,"width":0,"height":0,"order":27,"size":"m"},
  {"id":"2f2afda7-b763-4414-a52b-e285a8f2a5f7","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":28,"size":"m"},
  {"id":"650ffe53-30f1-41db-bf0c-34b7d9d68173","x":0,"y":0,"width":0,"height":0,"order":19,"size":"ms"},
  {"id":"5fb4dee5-712b-428b-93b7-5b2832d11992","x":0.24998910290250248,"y":0,"width":0,"height":0,"order":1,"size":"xs"},
  {"id":"a74d7a5d-4a1c-42b2-a728-8a2c5b1f7a8e","x":0,"y":0,"width":0,"height":0,"order":0,"size":"xs"},
  {"id":"a190ba6e-9dde-453c-b594-6198524f8900","x":0,"y":0,"width":0,"height":0,"order":9,"size":"ls"},
  {"id":"42697149-d1f3-48aa-bfb8-1f1388cd048c","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":26,"size":"m"},
  {"id":"5b1d60f4-4987-44df-8195-f9edc530fd9c","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":20,"size":"ms"},
  {"id":"467dbfc5-5d58-4dc1-b9ca-5e4f0bfb51f4","x":0,"y":0,"width":0,"height":0,"order":30,"size":"l"},
  {"id":"e62ddfdb-5595-40a3-8eb4-1ba5c6272dc2","x":0,"y":0,"width":0,"height":0,"order":31,"size":"ls"},
  {"id":"b4539f37-4c55-4c40-bfd4-270deecbc4e6","x":0,"y":0,"width":0,"height":0,"order":12,"size":"ls"},
  {"id":"da19c27c-ee53-43e9-af35-ed68bee1796a","x":0,"y":0,"width":0,"height":0,"order":10,"size":"ms"},
  {"id":"1d71ccb7-a262-4cee-b4d9-87110336786a","x":0,"y":0,"width":0,"height":0,"order":13,"size":"ls"},
  {"id":"600aa5ec-57fe-437a-9844-0eae1b2ae6a1","x":0,"y":0,"width":0,"height":0,"order":29,"size":"ls"},
  {"id":"4a133680-9957-4d3b-84d6-86af91bb4b8d","x":0,"y":0,"width":0,"height":0,"order":17,"size":"ls"},
  {"id":"623e2e4b-1803-4cf1-bff9-eb66388e9d9e","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":24,"size":"m"},
  {"id":"b4c0cc26-97b5-4b35-a5d4-285ea0a32980","x":0,"y":0,"width":0,"height":0,"order":23,"size":"m"},
  {"id":"78037390-23f2-4737-b44d-a610b7a2087f","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":5,"size":"ms"},
  {"id":"5e780fd0-4886-4d23-b0e5-e61466dc5a36","x":0,"y":0,"width":0,"height":0,"order":32,"size":"l"},
  {"id":"6467513a-6090-4d4b-a5b1-c8f3514a5ee3","x":0,"y":0,"width":0,"height":0,"order":25,"size":"m"},
  {"id":"72bac515-1483-4a72-87d0-16344f113a6b","x":0,"y":0,"width":0,"height":0,"order":14,"size":"ls"},
  {"id":"d9353611-266f-4add-b229-c35c9b58e63e","x":0,"y":0,"width":0,"height":0,"order":15,"size":"ls"},
  {"id":"a35faaa2-b365-4811-9e36-95e825bd8a32","x":0,"y":0,"width":0,"height":0,"order":16,"size":"ls"},
  {"id":"a948036f-c422-4bb9-bd1a-d38f60d67a1e","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":2,"size":"xs"},
  {"id":"5793e648-66a7-489e-b215-339d52b60cd9","x":0,"y":0,"width":0,"height":0,"order":7,"size":"ms"},
  {"id":"fe25ebb2-ae06-42e4-aeba-e75af4ec8ca4","x":0.49997820580500496,"y":0,"width":0,"height":0,"order":8,"size":"ms"},
  {"id":"78358993-a547-4052-a09b-5326950e5572","x":0,"y":0,"width":0,"height":0,"order":6,"size":"l"}
]"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tiles = parse_tiles(TILE_FEED)?;

    let log_path = std::env::temp_dir().join("mosaic-showcase.jsonl");
    let logger = Logger::new(FileSink::new(&log_path, 256 * 1024)?);
    let metrics = Arc::new(Mutex::new(PackMetrics::new()));

    let mut cache = LayoutCache::new(BreakpointCols::default())
        .with_logger(logger.clone())
        .with_metrics(metrics.clone());
    cache.sync(&tiles)?;

    println!(
        "packed {} tiles across {} breakpoints:",
        tiles.len(),
        cache.breakpoints().len()
    );
    for (label, layout) in cache.layouts() {
        let stats = layout.stats();
        println!(
            "  {:>4}  {:>2} cols  {:>3} row breaks  height {:>5.1}{}",
            label,
            layout.columns(),
            stats.rows_closed,
            stats.height,
            if stats.overshot { "  OVERSHOT" } else { "" }
        );
    }

    if let Some(lg) = cache.get("lg") {
        let settings = SketchSettings {
            cell_height: 1,
            ..SketchSettings::default()
        };
        println!("\nlg sketch ({} cols):\n{}", lg.columns(), sketch_layout(lg, &settings));

        let layouts: BTreeMap<&str, &[PlacedTile]> =
            BTreeMap::from([("lg", lg.tiles())]);
        println!("\nlayouts map:\n{}", serde_json::to_string(&layouts)?);
    }

    // A second sync with the same feed is served from the cache.
    cache.sync(&tiles)?;

    let snapshot = metrics.lock().expect("metrics mutex").snapshot();
    logger.log_event(snapshot_event(&snapshot, "mosaic::showcase"))?;
    println!(
        "\n{} packs, {} cache hit, {} cache miss (log: {})",
        snapshot.packs,
        snapshot.cache_hits,
        snapshot.cache_misses,
        log_path.display()
    );

    Ok(())
}
