// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar sanitizing and per-axis accessors shared by the calculator.

use kurbo::{Rect, Size};

use crate::types::Axis;

/// Non-finite values become zero.
#[inline]
pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Non-finite and negative values become zero.
#[inline]
pub(crate) fn extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// `[start, end]` of `r` along `axis`.
#[inline]
pub(crate) fn span(r: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (r.x0, r.x1),
        Axis::Vertical => (r.y0, r.y1),
    }
}

/// Extent of `s` along `axis`.
#[inline]
pub(crate) fn length(s: Size, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => s.width,
        Axis::Vertical => s.height,
    }
}

/// Clamp a segment starting at `pos` of length `len` into `[lo, hi]`.
///
/// When the segment is longer than the range it is pinned to `lo`.
#[inline]
pub(crate) fn clamp_segment(pos: f64, len: f64, lo: f64, hi: f64) -> f64 {
    let max = (hi - len).max(lo);
    pos.max(lo).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_segment_pins_oversized_to_start() {
        assert_eq!(clamp_segment(50.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(clamp_segment(95.0, 10.0, 0.0, 100.0), 90.0);
        assert_eq!(clamp_segment(-3.0, 10.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp_segment(40.0, 200.0, 4.0, 100.0), 4.0);
    }

    #[test]
    fn extent_rejects_negative_and_nan() {
        assert_eq!(extent(-1.0), 0.0);
        assert_eq!(extent(f64::NAN), 0.0);
        assert_eq!(extent(f64::INFINITY), 0.0);
        assert_eq!(extent(3.5), 3.5);
        assert_eq!(finite_or_zero(-2.0), -2.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }
}
