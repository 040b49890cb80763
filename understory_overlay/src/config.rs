// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for a coordinator.

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Size};
use understory_placement::{Alignment, PlacementSpec, Side};

/// How the overlay's width is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum OverlayWidth {
    /// Use the content's laid-out width.
    #[default]
    Intrinsic,
    /// A fixed width.
    Fixed(f64),
    /// Match the anchor's width (dropdowns, pickers).
    Target,
}

/// Where to put the overlay when the anchor cannot be measured.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum FallbackPosition {
    /// Below the last known anchor rectangle, start-aligned, or at the top-left
    /// boundary corner if the anchor was never measured.
    #[default]
    BelowStart,
    /// A fixed screen point.
    Point(Point),
}

bitflags::bitflags! {
    /// User interactions that close the overlay.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DismissFlags: u8 {
        /// Pointer down outside the overlay and its anchor.
        const CLICK_OUTSIDE = 0b0000_0001;
        /// Escape key.
        const ESCAPE        = 0b0000_0010;
    }
}

impl Default for DismissFlags {
    fn default() -> Self {
        Self::CLICK_OUTSIDE | Self::ESCAPE
    }
}

/// Placement, sizing, and dismissal policy for one overlay.
///
/// Start from [`Default`] or a preset such as [`OverlayConfig::tooltip`] and
/// adjust with the `with_*` setters.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Preferred placement.
    pub preferred: PlacementSpec,
    /// Fallback placements, in order of preference.
    pub fallbacks: Vec<PlacementSpec>,
    /// Gap between anchor and overlay.
    pub offset: f64,
    /// Minimum padding to the viewport edges.
    pub boundary: f64,
    /// Width policy.
    pub width: OverlayWidth,
    /// Height cap for the content.
    pub max_height: Option<f64>,
    /// Size estimate used before the content has laid out.
    pub size_hint: Option<Size>,
    /// Interactions that dismiss the overlay.
    pub dismiss: DismissFlags,
    /// React to on-screen keyboard changes by shrinking the viewport.
    pub keyboard_avoidance: bool,
    /// Focus the trigger again when the overlay closes (except on outside clicks).
    pub return_focus: bool,
    /// Close automatically this long after the overlay first appears.
    pub auto_hide: Option<Duration>,
    /// Close when the anchor is measured entirely outside the viewport.
    pub hide_when_detached: bool,
    /// Position used when the anchor cannot be measured.
    pub fallback: FallbackPosition,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let preferred = PlacementSpec::default();
        Self {
            preferred,
            fallbacks: vec![preferred.flipped()],
            offset: 0.0,
            boundary: 0.0,
            width: OverlayWidth::Intrinsic,
            max_height: None,
            size_hint: None,
            dismiss: DismissFlags::default(),
            keyboard_avoidance: false,
            return_focus: false,
            auto_hide: None,
            hide_when_detached: false,
            fallback: FallbackPosition::BelowStart,
        }
    }
}

impl OverlayConfig {
    /// Above the trigger, flipping below; closes on escape only.
    pub fn tooltip() -> Self {
        let top = PlacementSpec::new(Side::Top, Alignment::Center);
        Self {
            preferred: top,
            fallbacks: vec![top.flipped()],
            offset: 8.0,
            boundary: 4.0,
            dismiss: DismissFlags::ESCAPE,
            hide_when_detached: true,
            ..Self::default()
        }
    }

    /// Below the trigger, start-aligned, flipping above; returns focus on close.
    pub fn popover() -> Self {
        let bottom = PlacementSpec::new(Side::Bottom, Alignment::Start);
        Self {
            preferred: bottom,
            fallbacks: vec![bottom.flipped()],
            offset: 8.0,
            boundary: 8.0,
            return_focus: true,
            ..Self::default()
        }
    }

    /// Popover as wide as its trigger that avoids the on-screen keyboard
    /// (color and date pickers).
    pub fn dropdown() -> Self {
        Self {
            offset: 4.0,
            width: OverlayWidth::Target,
            keyboard_avoidance: true,
            ..Self::popover()
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

    /// Set the width policy.
    pub fn with_width(mut self, width: OverlayWidth) -> Self {
        self.width = width;
        self
    }

    /// Cap the content height.
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Provide a size estimate for the first placement.
    pub fn with_size_hint(mut self, size: Size) -> Self {
        self.size_hint = Some(size);
        self
    }

    /// Set which interactions dismiss the overlay.
    pub fn with_dismiss(mut self, dismiss: DismissFlags) -> Self {
        self.dismiss = dismiss;
        self
    }

    /// Enable or disable keyboard avoidance.
    pub fn with_keyboard_avoidance(mut self, enabled: bool) -> Self {
        self.keyboard_avoidance = enabled;
        self
    }

    /// Enable or disable returning focus to the trigger.
    pub fn with_return_focus(mut self, enabled: bool) -> Self {
        self.return_focus = enabled;
        self
    }

    /// Close automatically after `after`.
    pub fn with_auto_hide(mut self, after: Duration) -> Self {
        self.auto_hide = Some(after);
        self
    }

    /// Enable or disable closing when the anchor leaves the viewport.
    pub fn with_hide_when_detached(mut self, enabled: bool) -> Self {
        self.hide_when_detached = enabled;
        self
    }

    /// Set the unmeasurable-anchor fallback.
    pub fn with_fallback(mut self, fallback: FallbackPosition) -> Self {
        self.fallback = fallback;
        self
    }
}
