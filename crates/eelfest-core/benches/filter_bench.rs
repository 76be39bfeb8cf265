//! Benchmarks for the artist filter and the reveal scan fallback.
//!
//! Run with: cargo bench -p eelfest-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use eelfest_core::geometry::{Rect, Viewport};
use eelfest_core::reveal::RevealTracker;
use eelfest_core::search::ArtistSearch;
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

fn lineup(len: usize) -> Vec<String> {
    const WORDS: [&str; 8] = [
        "Neon", "Wave", "Voltage", "Drift", "Eel", "Collective", "Static", "Bloom",
    ];
    (0..len)
        .map(|i| format!("{} {} {i}", WORDS[i % WORDS.len()], WORDS[(i / 3) % WORDS.len()]))
        .collect()
}

fn rects(len: usize) -> Vec<Rect> {
    (0..len)
        .map(|i| Rect::new(0.0, i as f64 * 240.0, 320.0, 200.0))
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("artist_filter");
    for len in [12, 120, 1200] {
        let names = lineup(len);
        group.bench_with_input(BenchmarkId::new("keystrokes", len), &names, |b, names| {
            let mut search = ArtistSearch::new(names, 200);
            b.iter(|| {
                for query in ["n", "ne", "neo", "neon", "ne", ""] {
                    black_box(search.filter(black_box(query)));
                }
            });
        });
    }
    group.finish();
}

fn bench_reveal_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_scan");
    for len in [10, 100, 1000] {
        let boxes = rects(len);
        group.bench_with_input(BenchmarkId::new("scroll_ticks", len), &boxes, |b, boxes| {
            b.iter(|| {
                let mut tracker = RevealTracker::new(boxes.len());
                for tick in 0..50 {
                    let viewport = Viewport::new(f64::from(tick) * 40.0, 900.0);
                    black_box(tracker.scan(viewport, boxes));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_reveal_scan);
criterion_main!(benches);
