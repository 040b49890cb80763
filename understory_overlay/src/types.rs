// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the coordinator: lifecycle states, tickets, events, and errors.
//!
//! ## Overview
//!
//! These types describe the coordinator's protocol with its host and callers.
//! They are referenced by the [`coordinator`](crate::coordinator) and the
//! [`OverlayHost`](crate::host::OverlayHost) trait.

use kurbo::Point;
use understory_placement::{PlacementSpec, PositionResult};

use crate::registry::OverlayId;

/// Lifecycle state of one coordinator.
///
/// `Closed → Measuring → Positioning → Positioned`, with viewport changes moving
/// `Positioned → Positioning` until the next frame. Any state returns to
/// `Closed` on hide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CoordinatorState {
    /// Nothing is mounted and no measurement is pending.
    #[default]
    Closed,
    /// Waiting on an anchor measurement.
    Measuring,
    /// A recomputation is pending (coalesced until the next frame).
    Positioning,
    /// The overlay is mounted at its latest computed position.
    Positioned,
}

impl CoordinatorState {
    /// True for every state except [`Closed`](Self::Closed).
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Why an overlay closed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DismissReason {
    /// The caller hid the overlay.
    Programmatic,
    /// A pointer went down outside the overlay and its anchor.
    OutsideClick,
    /// The escape key was pressed.
    Escape,
    /// The auto-hide duration elapsed.
    Timeout,
    /// The anchor was measured entirely outside the viewport.
    AnchorDetached,
}

impl DismissReason {
    /// True when the user closed the overlay (outside click or escape).
    ///
    /// Callers use this to avoid immediately re-opening an overlay the user
    /// just dismissed.
    pub const fn is_user_initiated(self) -> bool {
        matches!(self, Self::OutsideClick | Self::Escape)
    }
}

/// Notification returned from coordinator entry points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// A new position was applied.
    PositionChanged {
        /// Placement in use.
        placement: PlacementSpec,
        /// The placement is a fallback on another side.
        flipped: bool,
        /// The overlay was translated to stay on screen.
        shifted: bool,
    },
    /// The anchor could not be measured; the overlay sits at the configured
    /// fallback position.
    Degraded,
    /// The overlay closed.
    Dismissed(DismissReason),
}

/// Identifies one anchor measurement request.
///
/// Hosts hand the ticket back to
/// [`OverlayCoordinator::on_measured`](crate::coordinator::OverlayCoordinator::on_measured)
/// untouched. Results whose ticket no longer matches the coordinator's current
/// session (or a newer request in the same session) are dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MeasureTicket {
    /// Overlay that asked.
    pub overlay: OverlayId,
    /// Session counter, bumped on every show and hide.
    pub generation: u64,
    /// Request counter within the session.
    pub request: u64,
}

/// Anchor measurement failure reported by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The anchor element was unmounted before layout.
    #[error("anchor is no longer mounted")]
    Detached,
    /// The platform could not produce a rectangle.
    #[error("anchor could not be measured")]
    Unavailable,
}

/// Viewport change delivered by the host's global listeners.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ViewportChange {
    /// Window or screen resized.
    Resize,
    /// A scroll container moved the anchor.
    Scroll,
    /// The on-screen keyboard appeared, disappeared, or changed height.
    Keyboard,
}

impl ViewportChange {
    /// True if the anchor may have moved on screen and must be measured again.
    pub const fn moves_anchor(self) -> bool {
        matches!(self, Self::Resize | Self::Scroll)
    }
}

/// Absolute position handed to the host's mount primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionStyle {
    /// Top-left of the overlay in screen coordinates.
    pub origin: Point,
    /// Explicit width, for fixed-width or anchor-width overlays.
    pub width: Option<f64>,
    /// Width cap; content beyond it should wrap or scroll.
    pub max_width: f64,
    /// Height cap; content beyond it should scroll.
    pub max_height: f64,
    /// Placement in use, e.g. for orienting an arrow glyph.
    pub placement: PlacementSpec,
    /// The anchor could not be measured and this is a fallback position.
    pub degraded: bool,
}

impl PositionStyle {
    pub(crate) fn from_result(result: &PositionResult, explicit_width: bool, degraded: bool) -> Self {
        Self {
            origin: result.origin,
            width: explicit_width.then_some(result.size.width),
            max_width: result.max_width,
            max_height: result.max_height,
            placement: result.placement,
            degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_outside_click_and_escape_are_user_initiated() {
        assert!(DismissReason::OutsideClick.is_user_initiated());
        assert!(DismissReason::Escape.is_user_initiated());
        assert!(!DismissReason::Programmatic.is_user_initiated());
        assert!(!DismissReason::Timeout.is_user_initiated());
        assert!(!DismissReason::AnchorDetached.is_user_initiated());
    }

    #[test]
    fn keyboard_changes_keep_the_anchor() {
        assert!(ViewportChange::Scroll.moves_anchor());
        assert!(ViewportChange::Resize.moves_anchor());
        assert!(!ViewportChange::Keyboard.moves_anchor());
    }

    #[test]
    fn measure_error_messages() {
        use alloc::string::ToString;
        assert_eq!(MeasureError::Detached.to_string(), "anchor is no longer mounted");
        assert_eq!(MeasureError::Unavailable.to_string(), "anchor could not be measured");
    }
}
