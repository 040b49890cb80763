// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{Alignment, PlacementSpec, PositioningRequest, Side, Viewport, compute};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

/// Anchors scattered over the viewport, including its edges and corners.
fn gen_requests(count: usize, size: Size, fallbacks: &[PlacementSpec]) -> Vec<PositioningRequest> {
    let mut rng = Rng::new(0x0FF5_E7ED_CAFE_BABE);
    let preferred = PlacementSpec::new(Side::Bottom, Alignment::Center);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * (VIEWPORT.width - 40.0);
            let y = rng.next_f64() * (VIEWPORT.height - 24.0);
            PositioningRequest::new(Rect::new(x, y, x + 40.0, y + 24.0), size, VIEWPORT)
                .with_preferred(preferred)
                .with_fallbacks(fallbacks.iter().copied())
                .with_offset(8.0)
                .with_boundary(8.0)
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let flip = [PlacementSpec::new(Side::Top, Alignment::Center)];
    let all_sides = [
        PlacementSpec::new(Side::Top, Alignment::Center),
        PlacementSpec::new(Side::Right, Alignment::Start),
        PlacementSpec::new(Side::Left, Alignment::Start),
    ];
    let cases = [
        ("tooltip_flip", Size::new(160.0, 32.0), &flip[..]),
        ("popover_four_sides", Size::new(320.0, 240.0), &all_sides[..]),
        // Taller than any side: every request goes through the most-room path.
        ("oversized_capped", Size::new(400.0, 1200.0), &all_sides[..]),
    ];
    for (name, size, fallbacks) in cases {
        let requests = gen_requests(1024, size, fallbacks);
        group.throughput(Throughput::Elements(requests.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                for r in &requests {
                    black_box(compute(black_box(r)));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
