// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement calculator: primary-axis fit, flip, cross-axis shift, and size capping.

use kurbo::{Point, Rect, Size};

use crate::types::{
    Alignment, Axis, PlacementSpec, PositionResult, PositioningRequest, Side, sanitize_rect,
};
use crate::util::{clamp_segment, extent, length, span};

/// Compute the overlay position for `request`.
///
/// Pure and deterministic: identical requests produce bit-identical results.
///
/// ## Algorithm
///
/// 1. The preferred placement is kept if the overlay's primary-axis extent fits
///    between the anchor edge (plus `offset`) and the viewport boundary.
/// 2. Otherwise the first fallback that fits wins.
/// 3. If nothing fits, the candidate with the most primary-axis space wins
///    (earlier candidates win ties) and the primary extent is capped to that space.
/// 4. The cross-axis position implied by the alignment is clamped into the
///    boundary box. The primary-axis position is clamped as well, which only
///    moves it when the anchor is partly or fully off screen.
///
/// `max_width`/`max_height` are always reported: the caller constraint (or
/// intrinsic size) capped to the viewport minus twice the boundary, and for
/// step 3 to the chosen side's space as well.
///
/// When neither axis has room the primary axis wins: the side from the search
/// above is kept and the cross axis is pinned to the start boundary.
pub fn compute(request: &PositioningRequest) -> PositionResult {
    let anchor = sanitize_rect(request.anchor);
    let offset = extent(request.offset);
    let bounds = request.viewport.sanitized().bounds(extent(request.boundary));

    let intrinsic = Size::new(
        extent(request.overlay.size.width),
        extent(request.overlay.size.height),
    );
    let mut max_width = request
        .overlay
        .max_width
        .map_or(intrinsic.width, extent)
        .min(bounds.width());
    let mut max_height = request
        .overlay
        .max_height
        .map_or(intrinsic.height, extent)
        .min(bounds.height());

    let capped = Size::new(intrinsic.width.min(max_width), intrinsic.height.min(max_height));
    let candidates = || core::iter::once(request.preferred).chain(request.fallbacks.iter().copied());
    let fits = |p: &PlacementSpec| {
        length(capped, p.side.axis()) <= available(anchor, bounds, p.side, offset)
    };

    let placement = match candidates().find(fits) {
        Some(p) => p,
        None => {
            let best = most_room(candidates(), anchor, bounds, offset);
            let room = available(anchor, bounds, best.side, offset);
            match best.side.axis() {
                Axis::Vertical => max_height = max_height.min(room),
                Axis::Horizontal => max_width = max_width.min(room),
            }
            best
        }
    };

    let size = Size::new(intrinsic.width.min(max_width), intrinsic.height.min(max_height));
    let axis = placement.side.axis();

    let main_len = length(size, axis);
    let (a0, a1) = span(anchor, axis);
    let (lo, hi) = span(bounds, axis);
    let naive_main = if placement.side.is_leading() {
        a0 - offset - main_len
    } else {
        a1 + offset
    };
    let main = clamp_segment(naive_main, main_len, lo, hi);

    let cross_len = length(size, axis.cross());
    let (c0, c1) = span(anchor, axis.cross());
    let (clo, chi) = span(bounds, axis.cross());
    let naive_cross = match placement.alignment {
        Alignment::Start => c0,
        Alignment::Center => (c0 + c1) / 2.0 - cross_len / 2.0,
        Alignment::End => c1 - cross_len,
    };
    let cross = clamp_segment(naive_cross, cross_len, clo, chi);

    let origin = match axis {
        Axis::Vertical => Point::new(cross, main),
        Axis::Horizontal => Point::new(main, cross),
    };

    PositionResult {
        origin,
        placement,
        size,
        max_width,
        max_height,
        flipped: placement.side != request.preferred.side,
        shifted: main != naive_main || cross != naive_cross,
    }
}

/// Space between the anchor edge facing `side` (pushed out by `offset`) and
/// the matching edge of `bounds`, clamped to `[0, bounds extent]`.
fn available(anchor: Rect, bounds: Rect, side: Side, offset: f64) -> f64 {
    let axis = side.axis();
    let (a0, a1) = span(anchor, axis);
    let (lo, hi) = span(bounds, axis);
    let raw = if side.is_leading() {
        a0 - offset - lo
    } else {
        hi - (a1 + offset)
    };
    raw.max(0.0).min(hi - lo)
}

/// Candidate with the strictly largest space; the first one wins ties.
fn most_room(
    mut candidates: impl Iterator<Item = PlacementSpec>,
    anchor: Rect,
    bounds: Rect,
    offset: f64,
) -> PlacementSpec {
    // The preferred placement always leads the iterator.
    let Some(first) = candidates.next() else {
        return PlacementSpec::default();
    };
    let mut best = (first, available(anchor, bounds, first.side, offset));
    for p in candidates {
        let room = available(anchor, bounds, p.side, offset);
        if room > best.1 {
            best = (p, room);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OverlaySize, Viewport};
    use alloc::vec;

    const TOP: PlacementSpec = PlacementSpec::new(Side::Top, Alignment::Center);
    const BOTTOM: PlacementSpec = PlacementSpec::new(Side::Bottom, Alignment::Center);

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn anchor(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size((x, y), (w, h))
    }

    fn assert_contained(r: &PositionResult, v: Viewport, boundary: f64) {
        let b = v.bounds(boundary);
        let rect = r.rect();
        assert!(
            rect.x0 >= b.x0 && rect.y0 >= b.y0 && rect.x1 <= b.x1 && rect.y1 <= b.y1,
            "{rect:?} escapes {b:?}"
        );
    }

    // Tooltip on a trigger flush with the top edge has to go below.
    #[test]
    fn tooltip_near_top_flips_below() {
        let req = PositioningRequest::new(anchor(100.0, 0.0, 40.0, 20.0), Size::new(120.0, 30.0), vp())
            .with_preferred(TOP)
            .with_fallbacks([BOTTOM])
            .with_offset(8.0)
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Bottom);
        assert_eq!(r.origin.y, 28.0);
        assert!(r.flipped);
        assert!(!r.shifted);
        assert_eq!(r.origin.x, 60.0);
    }

    #[test]
    fn preferred_kept_when_it_fits() {
        let req = PositioningRequest::new(anchor(300.0, 200.0, 80.0, 24.0), Size::new(200.0, 120.0), vp())
            .with_fallbacks([TOP])
            .with_offset(8.0)
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement, BOTTOM);
        assert!(!r.flipped && !r.shifted);
        assert_eq!(r.origin, Point::new(240.0, 232.0));
        assert_eq!(r.max_width, 200.0);
        assert_eq!(r.max_height, 120.0);
    }

    #[test]
    fn flips_to_top_near_bottom_edge() {
        let req = PositioningRequest::new(anchor(300.0, 560.0, 80.0, 24.0), Size::new(200.0, 120.0), vp())
            .with_preferred(BOTTOM)
            .with_fallbacks([TOP])
            .with_offset(8.0)
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Top);
        assert!(r.flipped);
        assert_eq!(r.origin.y, 560.0 - 8.0 - 120.0);
        assert_contained(&r, vp(), 4.0);
    }

    #[test]
    fn shifts_back_from_right_edge() {
        let req = PositioningRequest::new(anchor(760.0, 100.0, 30.0, 20.0), Size::new(200.0, 50.0), vp())
            .with_preferred(BOTTOM)
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Bottom);
        assert!(r.shifted);
        assert!(!r.flipped);
        assert_eq!(r.origin.x, 800.0 - 4.0 - 200.0);
    }

    #[test]
    fn caps_height_when_nothing_fits() {
        // 300 below the anchor, 272 above it, both inside the boundary.
        let req = PositioningRequest::new(anchor(100.0, 276.0, 40.0, 20.0), Size::new(160.0, 500.0), vp())
            .with_preferred(BOTTOM)
            .with_fallbacks([TOP])
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Bottom);
        assert!(!r.flipped);
        assert_eq!(r.max_height, 300.0);
        assert_eq!(r.size.height, 300.0);
        assert_eq!(r.origin.y, 296.0);
        assert_contained(&r, vp(), 4.0);
    }

    #[test]
    fn identical_requests_are_bit_identical() {
        let req = PositioningRequest::new(anchor(13.3, 577.7, 41.1, 19.9), Size::new(333.3, 222.2), vp())
            .with_preferred(PlacementSpec::new(Side::Right, Alignment::End))
            .with_fallbacks([
                PlacementSpec::new(Side::Left, Alignment::End),
                TOP,
            ])
            .with_offset(6.5)
            .with_boundary(3.25);
        let a = compute(&req);
        let b = compute(&req);
        assert_eq!(a, b);
        assert_eq!(a.origin.x.to_bits(), b.origin.x.to_bits());
        assert_eq!(a.origin.y.to_bits(), b.origin.y.to_bits());
        assert_eq!(a.max_width.to_bits(), b.max_width.to_bits());
        assert_eq!(a.max_height.to_bits(), b.max_height.to_bits());
    }

    #[test]
    fn first_fitting_fallback_wins_over_roomier_one() {
        // Left is preferred but blocked; Top fits, Right would have more room.
        let req = PositioningRequest::new(anchor(10.0, 300.0, 20.0, 20.0), Size::new(100.0, 50.0), vp())
            .with_preferred(PlacementSpec::new(Side::Left, Alignment::Center))
            .with_fallbacks([TOP, PlacementSpec::new(Side::Right, Alignment::Center)]);
        let r = compute(&req);
        assert_eq!(r.placement, TOP);
        assert!(r.flipped);
    }

    #[test]
    fn equal_room_tie_goes_to_earlier_fallback() {
        let req = PositioningRequest::new(anchor(10.0, 290.0, 20.0, 20.0), Size::new(500.0, 400.0), vp())
            .with_preferred(PlacementSpec::new(Side::Left, Alignment::Center))
            .with_fallbacks([TOP, BOTTOM]);
        let r = compute(&req);
        assert_eq!(r.placement, TOP);
        assert!(r.flipped);
        assert_eq!(r.max_height, 290.0);
        assert_eq!(r.origin.y, 0.0);
    }

    #[test]
    fn no_fallbacks_keeps_preferred_and_caps() {
        let req = PositioningRequest::new(anchor(100.0, 500.0, 40.0, 20.0), Size::new(100.0, 200.0), vp());
        let r = compute(&req);
        assert_eq!(r.placement, BOTTOM);
        assert!(!r.flipped);
        assert_eq!(r.max_height, 80.0);
        assert_eq!(r.origin.y, 520.0);
    }

    #[test]
    fn caller_constraint_bounds_the_cap() {
        let overlay = OverlaySize::fixed(Size::new(100.0, 400.0)).with_max_height(150.0);
        let req = PositioningRequest::new(anchor(100.0, 100.0, 40.0, 20.0), overlay, vp())
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.max_height, 150.0);
        assert_eq!(r.size.height, 150.0);
        // A constraint larger than the viewport is reduced to it.
        let overlay = OverlaySize::fixed(Size::new(100.0, 50.0)).with_max_width(5000.0);
        let req = PositioningRequest::new(anchor(100.0, 100.0, 40.0, 20.0), overlay, vp())
            .with_boundary(4.0);
        assert_eq!(compute(&req).max_width, 792.0);
    }

    #[test]
    fn horizontal_sides_use_width_and_align_vertically() {
        let req = PositioningRequest::new(anchor(100.0, 100.0, 40.0, 20.0), Size::new(80.0, 60.0), vp())
            .with_preferred(PlacementSpec::new(Side::Right, Alignment::End))
            .with_offset(4.0);
        let r = compute(&req);
        assert_eq!(r.origin, Point::new(144.0, 60.0));

        let req = req.with_preferred(PlacementSpec::new(Side::Left, Alignment::Start));
        let r = compute(&req);
        assert_eq!(r.origin, Point::new(16.0, 100.0));
    }

    #[test]
    fn keyboard_inset_forces_flip() {
        let v = vp().with_insets(0.0, 300.0);
        let req = PositioningRequest::new(anchor(100.0, 220.0, 40.0, 20.0), Size::new(100.0, 120.0), v)
            .with_fallbacks([TOP])
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Top);
        assert_contained(&r, v, 4.0);
    }

    #[test]
    fn offscreen_anchor_still_yields_onscreen_result() {
        let req = PositioningRequest::new(anchor(100.0, 2000.0, 40.0, 20.0), Size::new(100.0, 100.0), vp())
            .with_fallbacks([TOP])
            .with_offset(8.0)
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Top);
        assert!(r.shifted);
        assert_contained(&r, vp(), 4.0);
    }

    #[test]
    fn both_axes_starved_pins_cross_axis() {
        let v = Viewport::new(100.0, 80.0);
        let req = PositioningRequest::new(anchor(60.0, 30.0, 20.0, 20.0), Size::new(300.0, 300.0), v)
            .with_fallbacks([TOP])
            .with_boundary(4.0);
        let r = compute(&req);
        assert_eq!(r.placement.side, Side::Bottom);
        assert_eq!(r.max_width, 92.0);
        assert_eq!(r.origin.x, 4.0);
        assert!(r.shifted);
        assert_contained(&r, v, 4.0);
    }

    #[test]
    fn malformed_input_is_clamped() {
        let req = PositioningRequest::new(
            Rect::new(f64::NAN, 10.0, 40.0, 5.0),
            Size::new(-20.0, f64::INFINITY),
            Viewport::new(400.0, f64::NAN),
        )
        .with_offset(-3.0)
        .with_boundary(f64::NAN);
        let r = compute(&req);
        assert_eq!(r.size, Size::ZERO);
        assert!(r.origin.x.is_finite() && r.origin.y.is_finite());
        assert!(r.max_width >= 0.0 && r.max_height >= 0.0);
    }

    #[test]
    fn containment_sweep() {
        let boundary = 4.0;
        let sizes = [Size::new(60.0, 30.0), Size::new(240.0, 180.0), Size::new(700.0, 520.0)];
        let sides = [Side::Top, Side::Bottom, Side::Left, Side::Right];
        let alignments = [Alignment::Start, Alignment::Center, Alignment::End];
        for ax in (0..=800).step_by(80) {
            for ay in (0..=600).step_by(60) {
                for size in sizes {
                    for side in sides {
                        for alignment in alignments {
                            let preferred = PlacementSpec::new(side, alignment);
                            let req = PositioningRequest::new(
                                anchor(f64::from(ax) - 20.0, f64::from(ay) - 10.0, 40.0, 20.0),
                                size,
                                vp(),
                            )
                            .with_preferred(preferred)
                            .with_fallbacks(vec![preferred.flipped()])
                            .with_offset(8.0)
                            .with_boundary(boundary);
                            assert_contained(&compute(&req), vp(), boundary);
                        }
                    }
                }
            }
        }
    }
}
