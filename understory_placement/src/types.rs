// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: sides, alignments, viewports, requests, and results.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};

use crate::util::{clamp_segment, extent, finite_or_zero};

/// Layout axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The other axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Side of the anchor the overlay is placed on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// The primary axis for this side.
    ///
    /// `Top`/`Bottom` stack vertically, `Left`/`Right` horizontally.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// The side across the anchor.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True if the overlay grows towards the start of the primary axis (up or left).
    pub(crate) const fn is_leading(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }
}

/// Cross-axis anchoring of the overlay relative to the anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Align the overlay's start edge with the anchor's start edge.
    Start,
    /// Center the overlay on the anchor.
    #[default]
    Center,
    /// Align the overlay's end edge with the anchor's end edge.
    End,
}

/// A single candidate placement: a side plus a cross-axis alignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PlacementSpec {
    /// Side of the anchor; determines the primary axis.
    pub side: Side,
    /// Cross-axis alignment.
    pub alignment: Alignment,
}

impl PlacementSpec {
    /// Create a placement.
    pub const fn new(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }

    /// Same alignment on the opposite side.
    ///
    /// Handy for building the usual single-entry fallback list.
    pub const fn flipped(self) -> Self {
        Self {
            side: self.side.opposite(),
            alignment: self.alignment,
        }
    }
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self::new(Side::Bottom, Alignment::Center)
    }
}

/// Visible screen area.
///
/// Insets shrink the usable height, e.g. while an on-screen keyboard or
/// safe-area chrome is present. Hosts rebuild this on every resize or keyboard
/// change; nothing here is cached.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Full width.
    pub width: f64,
    /// Full height.
    pub height: f64,
    /// Height lost at the top (status bar, notch).
    pub inset_top: f64,
    /// Height lost at the bottom (keyboard, home indicator).
    pub inset_bottom: f64,
}

impl Viewport {
    /// A viewport without insets.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            inset_top: 0.0,
            inset_bottom: 0.0,
        }
    }

    /// Replace the vertical insets.
    pub const fn with_insets(mut self, top: f64, bottom: f64) -> Self {
        self.inset_top = top;
        self.inset_bottom = bottom;
        self
    }

    /// Copy with every dimension made finite and non-negative.
    pub fn sanitized(self) -> Self {
        Self {
            width: extent(self.width),
            height: extent(self.height),
            inset_top: extent(self.inset_top),
            inset_bottom: extent(self.inset_bottom),
        }
    }

    /// The usable area in screen coordinates, after insets.
    ///
    /// Insets larger than the height collapse the area to zero height at `inset_top`.
    pub fn usable(&self) -> Rect {
        let top = self.inset_top.min(self.height);
        let bottom = (self.height - self.inset_bottom).max(top);
        Rect::new(0.0, top, self.width, bottom)
    }

    /// The usable area shrunk by `boundary` on every edge.
    ///
    /// Never inverted: when the boundary eats the whole area the result is
    /// empty and sits at the top-left boundary corner.
    pub fn bounds(&self, boundary: f64) -> Rect {
        let u = self.usable();
        let x0 = u.x0 + boundary;
        let y0 = u.y0 + boundary;
        Rect::new(x0, y0, (u.x1 - boundary).max(x0), (u.y1 - boundary).max(y0))
    }

    /// Move a box of `size` wanting to sit at `origin` so it lies inside
    /// [`bounds`](Self::bounds).
    ///
    /// Boxes larger than the bounds are pinned to the top-left corner; cap the
    /// size first if the whole box must fit. Non-finite coordinates count as zero.
    pub fn confine(&self, origin: Point, size: Size, boundary: f64) -> Point {
        let b = self.sanitized().bounds(extent(boundary));
        Point::new(
            clamp_segment(finite_or_zero(origin.x), extent(size.width), b.x0, b.x1),
            clamp_segment(finite_or_zero(origin.y), extent(size.height), b.y0, b.y1),
        )
    }
}

/// Overlay extent: an intrinsic (or estimated) size plus optional caller caps.
///
/// This is the "size or constraints" input of a [`PositioningRequest`]. When a
/// cap is present it replaces the intrinsic extent as the basis for
/// [`PositionResult::max_width`]/[`PositionResult::max_height`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OverlaySize {
    /// Intrinsic size of the overlay content.
    pub size: Size,
    /// Caller cap on the width.
    pub max_width: Option<f64>,
    /// Caller cap on the height.
    pub max_height: Option<f64>,
}

impl OverlaySize {
    /// An uncapped size.
    pub const fn fixed(size: Size) -> Self {
        Self {
            size,
            max_width: None,
            max_height: None,
        }
    }

    /// Set the width cap.
    pub const fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Set the height cap.
    pub const fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }
}

impl From<Size> for OverlaySize {
    fn from(size: Size) -> Self {
        Self::fixed(size)
    }
}

/// Immutable input to one placement calculation.
///
/// Build with [`PositioningRequest::new`] and the `with_*` setters, then call
/// [`compute`](crate::compute) (or [`PositioningRequest::compute`]).
#[derive(Clone, Debug, PartialEq)]
pub struct PositioningRequest {
    /// Anchor rectangle in screen coordinates.
    pub anchor: Rect,
    /// Overlay size or constraints.
    pub overlay: OverlaySize,
    /// Preferred placement.
    pub preferred: PlacementSpec,
    /// Fallback placements, in order of preference.
    pub fallbacks: Vec<PlacementSpec>,
    /// Gap between anchor and overlay along the primary axis.
    pub offset: f64,
    /// Minimum padding kept between the overlay and the viewport edges.
    pub boundary: f64,
    /// Viewport the overlay must stay within.
    pub viewport: Viewport,
}

impl PositioningRequest {
    /// Create a request with the default placement (bottom, centered), no
    /// fallbacks, and zero offset and boundary.
    pub fn new(anchor: Rect, overlay: impl Into<OverlaySize>, viewport: Viewport) -> Self {
        Self {
            anchor,
            overlay: overlay.into(),
            preferred: PlacementSpec::default(),
            fallbacks: Vec::new(),
            offset: 0.0,
            boundary: 0.0,
            viewport,
        }
    }

    /// Set the preferred placement.
    pub fn with_preferred(mut self, preferred: PlacementSpec) -> Self {
        self.preferred = preferred;
        self
    }

    /// Set the fallback placements.
    pub fn with_fallbacks(mut self, fallbacks: impl IntoIterator<Item = PlacementSpec>) -> Self {
        self.fallbacks = fallbacks.into_iter().collect();
        self
    }

    /// Set the anchor gap.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the viewport padding.
    pub fn with_boundary(mut self, boundary: f64) -> Self {
        self.boundary = boundary;
        self
    }

    /// Run the calculator on this request.
    pub fn compute(&self) -> PositionResult {
        crate::compute(self)
    }
}

/// Output of one placement calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionResult {
    /// Top-left of the overlay in screen coordinates.
    pub origin: Point,
    /// Placement that was used.
    pub placement: PlacementSpec,
    /// Overlay extent the geometry was solved for: the intrinsic size capped by
    /// `max_width`/`max_height`.
    pub size: Size,
    /// Width cap for the overlay content.
    pub max_width: f64,
    /// Height cap for the overlay content; larger content should scroll.
    pub max_height: f64,
    /// The resolved side differs from the preferred side.
    pub flipped: bool,
    /// The overlay was translated to stay inside the viewport boundary.
    pub shifted: bool,
}

impl PositionResult {
    /// The overlay rectangle in screen coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Sanitize an anchor rectangle: non-finite coordinates become zero and
/// inverted extents collapse to zero.
pub(crate) fn sanitize_rect(r: Rect) -> Rect {
    let x0 = finite_or_zero(r.x0);
    let y0 = finite_or_zero(r.y0);
    Rect::new(x0, y0, finite_or_zero(r.x1).max(x0), finite_or_zero(r.y1).max(y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_axes_and_opposites() {
        assert_eq!(Side::Top.axis(), Axis::Vertical);
        assert_eq!(Side::Right.axis(), Axis::Horizontal);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
        let p = PlacementSpec::new(Side::Top, Alignment::End).flipped();
        assert_eq!(p, PlacementSpec::new(Side::Bottom, Alignment::End));
    }

    #[test]
    fn viewport_bounds_respect_insets() {
        let v = Viewport::new(800.0, 600.0).with_insets(20.0, 250.0);
        assert_eq!(v.usable(), Rect::new(0.0, 20.0, 800.0, 350.0));
        assert_eq!(v.bounds(4.0), Rect::new(4.0, 24.0, 796.0, 346.0));
    }

    #[test]
    fn viewport_bounds_never_invert() {
        let v = Viewport::new(10.0, 10.0).with_insets(8.0, 8.0);
        let b = v.bounds(4.0);
        assert!(b.x1 >= b.x0 && b.y1 >= b.y0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn viewport_sanitizes_garbage() {
        let v = Viewport {
            width: f64::NAN,
            height: -5.0,
            inset_top: f64::INFINITY,
            inset_bottom: 3.0,
        }
        .sanitized();
        assert_eq!(v, Viewport::new(0.0, 0.0).with_insets(0.0, 3.0));
    }

    #[test]
    fn confine_pulls_boxes_inside() {
        let v = Viewport::new(800.0, 600.0);
        let p = v.confine(Point::new(780.0, -10.0), Size::new(100.0, 40.0), 4.0);
        assert_eq!(p, Point::new(696.0, 4.0));
        let p = v.confine(Point::new(f64::NAN, 300.0), Size::new(10.0, 10.0), 0.0);
        assert_eq!(p, Point::new(0.0, 300.0));
    }

    #[test]
    fn sanitize_rect_collapses_inverted() {
        let r = sanitize_rect(Rect::new(10.0, f64::NAN, 5.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 0.0, 10.0, 20.0));
    }
}
