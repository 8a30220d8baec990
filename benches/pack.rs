use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mosaic::{
    BreakpointCols, LayoutCache, Packer, SizeClass, TileDescriptor, WrapRule, pack_breakpoints,
};

fn build_feed(count: usize) -> Vec<TileDescriptor> {
    (0..count)
        .map(|i| {
            let class = SizeClass::ALL[i % SizeClass::ALL.len()];
            TileDescriptor::new(format!("tile-{i}"), (count - i) as i64, class)
        })
        .collect()
}

fn pack_large_feed(c: &mut Criterion) {
    let feed = build_feed(10_000);
    let packer = Packer::new(12).expect("packer");
    c.bench_function("pack_large_feed", |b| {
        b.iter(|| packer.pack(black_box(&feed)).expect("pack"));
    });
}

fn pack_breakpoint_ladder(c: &mut Criterion) {
    let feed = build_feed(1_000);
    let breakpoints = BreakpointCols::default();
    c.bench_function("pack_breakpoint_ladder", |b| {
        b.iter(|| {
            pack_breakpoints(black_box(&feed), &breakpoints, WrapRule::ExactFit).expect("pack")
        });
    });
}

fn cache_hit_resync(c: &mut Criterion) {
    let feed = build_feed(1_000);
    let mut cache = LayoutCache::new(BreakpointCols::default());
    cache.sync(&feed).expect("warm sync");
    c.bench_function("cache_hit_resync", |b| {
        b.iter(|| {
            cache.sync(black_box(&feed)).expect("resync");
        });
    });
}

criterion_group!(
    benches,
    pack_large_feed,
    pack_breakpoint_ladder,
    cache_hit_resync
);
criterion_main!(benches);
