// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform seam: measurement, mounting, viewport queries, and listeners.

use understory_placement::Viewport;

use crate::registry::{ListenerRegistry, OverlayId};
use crate::types::{MeasureTicket, PositionStyle};

/// Platform services a coordinator drives.
///
/// One host usually serves every coordinator in a window; each call carries the
/// [`OverlayId`] it concerns.
///
/// Measurement is asynchronous: [`request_measure`](Self::request_measure) only
/// queues the work, and the host later reports the outcome through
/// [`OverlayCoordinator::on_measured`](crate::coordinator::OverlayCoordinator::on_measured)
/// with the same ticket. Hosts must not call back into the coordinator from
/// inside any method of this trait.
pub trait OverlayHost {
    /// Reference to the trigger element an overlay is anchored to.
    type Anchor;
    /// Overlay content handed to the mount primitive.
    type Content;

    /// Current visible screen bounds and insets.
    ///
    /// `inset_bottom` covers everything at the bottom edge: the on-screen
    /// keyboard plus safe-area chrome.
    fn viewport(&self) -> Viewport;

    /// The on-screen keyboard's share of [`Viewport::inset_bottom`].
    ///
    /// Overlays without keyboard avoidance subtract this and keep the rest of the
    /// bottom inset.
    fn keyboard_inset(&self) -> f64 {
        0.0
    }

    /// Start measuring `anchor`'s on-screen rectangle.
    fn request_measure(&mut self, anchor: &Self::Anchor, ticket: MeasureTicket);

    /// Render `content` at `style`.
    fn mount(&mut self, overlay: OverlayId, content: Self::Content, style: &PositionStyle);

    /// Move already-mounted content to `style`.
    fn reposition(&mut self, overlay: OverlayId, style: &PositionStyle);

    /// Remove mounted content.
    fn unmount(&mut self, overlay: OverlayId);

    /// Give keyboard focus back to the trigger.
    fn focus_anchor(&mut self, anchor: &Self::Anchor) {
        let _ = anchor;
    }

    /// The shared listener registry.
    fn listeners(&mut self) -> &mut ListenerRegistry;
}
