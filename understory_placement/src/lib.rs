// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: a Kurbo-native placement calculator for anchored overlays.
//!
//! Tooltips, popovers, and picker dropdowns all share one geometric problem: put a
//! box next to an anchor, keep it on screen, and degrade gracefully when the
//! preferred side has no room. This crate solves that problem as a single pure
//! function, [`compute`].
//!
//! - Flip: when the preferred side lacks room, the first fallback that fits is used.
//! - Shift: the overlay slides along the cross axis to stay inside the viewport boundary.
//! - Cap: `max_width`/`max_height` are always reported so content can scroll instead of overflowing.
//!
//! ## Not a layout engine
//!
//! This crate does not measure anything and keeps no state. Callers supply the
//! anchor rectangle, the overlay's size (or a size estimate before first paint),
//! and the current [`Viewport`]. Lifecycle concerns such as measuring anchors,
//! mounting content, or dismissing overlays live in `understory_overlay`.
//!
//! ## Coordinates
//!
//! Everything is in screen coordinates with `y` growing downward. The usable area
//! is the viewport minus its top and bottom insets (status bars, on-screen
//! keyboards), shrunk by `boundary` on each edge.
//!
//! ## Guarantees
//!
//! - Deterministic: identical requests give bit-identical results.
//! - Contained: the overlay rectangle at its capped size always lies inside the
//!   boundary box. When no candidate fits, the least-bad placement is returned
//!   and `shifted` reports any translation it needed.
//! - Total: malformed input (negative extents, non-finite values) is clamped to
//!   zero instead of rejected.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{Alignment, PlacementSpec, PositioningRequest, Side, Viewport, compute};
//!
//! // A trigger flush with the top of an 800×600 window.
//! let anchor = Rect::from_origin_size((100.0, 0.0), (40.0, 20.0));
//! let top = PlacementSpec::new(Side::Top, Alignment::Center);
//!
//! let request = PositioningRequest::new(anchor, Size::new(120.0, 30.0), Viewport::new(800.0, 600.0))
//!     .with_preferred(top)
//!     .with_fallbacks([top.flipped()])
//!     .with_offset(8.0)
//!     .with_boundary(4.0);
//!
//! let result = compute(&request);
//! assert_eq!(result.placement.side, Side::Bottom);
//! assert!(result.flipped);
//! assert_eq!(result.origin.y, 28.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
pub mod types;
mod util;

pub use compute::compute;
pub use types::{
    Alignment, Axis, OverlaySize, PlacementSpec, PositionResult, PositioningRequest, Side,
    Viewport,
};
