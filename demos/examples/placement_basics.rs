// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics: keep, flip, shift, and cap.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_basics`

use kurbo::{Rect, Size};
use understory_placement::{Alignment, PlacementSpec, PositioningRequest, Side, Viewport, compute};

fn main() {
    let viewport = Viewport::new(800.0, 600.0);
    let bottom = PlacementSpec::new(Side::Bottom, Alignment::Center);

    let request = |anchor: Rect, size: Size| {
        PositioningRequest::new(anchor, size, viewport)
            .with_preferred(bottom)
            .with_fallbacks([bottom.flipped()])
            .with_offset(8.0)
            .with_boundary(4.0)
    };

    // Plenty of room below.
    let keep = compute(&request(Rect::new(300.0, 100.0, 380.0, 124.0), Size::new(200.0, 120.0)));
    println!("== Keep ==\n  {:?}", keep);
    assert_eq!(keep.placement.side, Side::Bottom);

    // Trigger near the bottom edge: flips above.
    let flip = compute(&request(Rect::new(300.0, 560.0, 380.0, 584.0), Size::new(200.0, 120.0)));
    println!("== Flip ==\n  {:?}", flip);
    assert!(flip.flipped);
    assert_eq!(flip.placement.side, Side::Top);

    // Trigger near the right edge: slides left, stays below.
    let shift = compute(&request(Rect::new(760.0, 100.0, 790.0, 120.0), Size::new(200.0, 50.0)));
    println!("== Shift ==\n  {:?}", shift);
    assert!(shift.shifted);
    assert_eq!(shift.origin.x, 596.0);

    // Taller than either side: takes the roomier side and caps its height.
    let cap = compute(&request(Rect::new(100.0, 276.0, 140.0, 296.0), Size::new(160.0, 500.0)));
    println!("== Cap ==\n  {:?}", cap);
    println!("  content scrolls inside max_height = {}", cap.max_height);
    assert!(cap.max_height < 500.0);
}
