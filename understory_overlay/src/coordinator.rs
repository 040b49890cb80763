// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator implementation.
//!
//! ## Overview
//!
//! One [`OverlayCoordinator`] is bound to one trigger/overlay pair. It owns the
//! open/closed state, asks the host to measure the anchor, runs
//! [`understory_placement::compute`] whenever an input changes, and tells the
//! host where to mount or move the content.
//!
//! ## Sessions and stale results
//!
//! Every [`show`](OverlayCoordinator::show) and every close starts a new session
//! by bumping a generation counter. Measurement tickets carry the generation
//! they were issued in, so a measurement that resolves after its session ended
//! is dropped on arrival and a closed overlay never reappears. Within a session
//! only the newest request is honored.
//!
//! ## First paint
//!
//! The first placement uses the configured size hint (or zero). The first
//! [`on_content_layout`](OverlayCoordinator::on_content_layout) of a session
//! records the real size and re-measures; later layout signals in the same
//! session are ignored so a position change cannot feed back into itself.
//!
//! ## Coalescing
//!
//! Viewport changes only mark a refresh as pending. The next
//! [`on_frame`](OverlayCoordinator::on_frame) performs at most one recomputation,
//! re-measuring first if any of the coalesced changes could have moved the anchor.

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use tracing::{debug, trace};
use understory_placement::{OverlaySize, PositionResult, PositioningRequest, Viewport, compute};

use crate::config::{DismissFlags, FallbackPosition, OverlayConfig, OverlayWidth};
use crate::host::OverlayHost;
use crate::registry::{Interest, OverlayId};
use crate::types::{
    CoordinatorState, DismissReason, MeasureError, MeasureTicket, OverlayEvent, PositionStyle,
    ViewportChange,
};

#[derive(Copy, Clone, Debug, Default)]
struct Refresh {
    remeasure: bool,
}

/// Lifecycle controller for one anchored overlay.
///
/// ## Usage
///
/// - Construct with [`OverlayCoordinator::new`], which registers the overlay
///   with the host's [`ListenerRegistry`](crate::registry::ListenerRegistry).
/// - Call [`show`](Self::show) / [`hide`](Self::hide) /
///   [`update_position`](Self::update_position) from the owning widget.
/// - Feed host callbacks back in: [`on_measured`](Self::on_measured),
///   [`on_content_layout`](Self::on_content_layout), and the global events the
///   overlay is subscribed to ([`on_viewport_change`](Self::on_viewport_change),
///   [`on_frame`](Self::on_frame), [`on_pointer_down`](Self::on_pointer_down),
///   [`on_escape`](Self::on_escape)).
/// - Entry points that can change what is on screen return [`OverlayEvent`]s
///   for the widget to react to.
pub struct OverlayCoordinator<H: OverlayHost> {
    id: OverlayId,
    anchor: H::Anchor,
    config: OverlayConfig,
    state: CoordinatorState,
    generation: u64,
    request: u64,
    // Held until the first placement of a session mounts it.
    content: Option<H::Content>,
    mounted: bool,
    // Measured in the current session; used for hit-testing and placement.
    anchor_rect: Option<Rect>,
    // Survives across sessions for `FallbackPosition::BelowStart`.
    last_anchor: Option<Rect>,
    content_size: Option<Size>,
    corrected: bool,
    pending: Option<Refresh>,
    last: Option<PositionResult>,
    degraded: bool,
    visible_since: Option<Duration>,
}

impl<H: OverlayHost> core::fmt::Debug for OverlayCoordinator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayCoordinator")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("mounted", &self.mounted)
            .field("degraded", &self.degraded)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> OverlayCoordinator<H> {
    /// Create a closed coordinator for `anchor`.
    pub fn new(host: &mut H, anchor: H::Anchor, config: OverlayConfig) -> Self {
        Self {
            id: host.listeners().register(),
            anchor,
            config,
            state: CoordinatorState::Closed,
            generation: 0,
            request: 0,
            content: None,
            mounted: false,
            anchor_rect: None,
            last_anchor: None,
            content_size: None,
            corrected: false,
            pending: None,
            last: None,
            degraded: false,
            visible_since: None,
        }
    }

    /// Identifier used with the host and the listener registry.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The trigger reference.
    pub fn anchor(&self) -> &H::Anchor {
        &self.anchor
    }

    /// Current configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// True unless closed.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Session counter; changes on every show and close.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The most recently applied placement in this session.
    pub fn last_result(&self) -> Option<&PositionResult> {
        self.last.as_ref()
    }

    /// True while the overlay sits at the fallback position because the anchor
    /// could not be measured.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Open the overlay with `content`.
    ///
    /// Subscribes to global events and requests an anchor measurement; the
    /// content is mounted once that measurement resolves. Returns `false` and
    /// does nothing if the overlay is already open.
    pub fn show(&mut self, host: &mut H, content: H::Content) -> bool {
        if self.state.is_open() {
            trace!(overlay = self.id.get(), state = ?self.state, "show ignored while open");
            return false;
        }
        self.generation = self.generation.wrapping_add(1);
        self.request = 0;
        self.content = Some(content);
        self.anchor_rect = None;
        self.content_size = self.config.size_hint;
        self.corrected = false;
        self.pending = None;
        self.last = None;
        self.degraded = false;
        self.visible_since = None;
        host.listeners().subscribe(self.id, self.interest());
        debug!(overlay = self.id.get(), generation = self.generation, "show");
        self.measure(host);
        true
    }

    /// Close the overlay programmatically.
    pub fn hide(&mut self, host: &mut H) -> Vec<OverlayEvent> {
        self.close(host, DismissReason::Programmatic)
    }

    /// Close the overlay with an explicit reason.
    pub fn dismiss(&mut self, host: &mut H, reason: DismissReason) -> Vec<OverlayEvent> {
        self.close(host, reason)
    }

    /// Re-measure the anchor and recompute the position without changing the
    /// open/closed state.
    ///
    /// Has no effect while closed or while a measurement is already in flight.
    pub fn update_position(&mut self, host: &mut H) {
        match self.state {
            CoordinatorState::Closed => {}
            CoordinatorState::Measuring => {
                trace!(overlay = self.id.get(), "measurement already in flight");
            }
            CoordinatorState::Positioning | CoordinatorState::Positioned => {
                self.pending = None;
                self.measure(host);
            }
        }
    }

    /// Deliver the outcome of a measurement requested with `ticket`.
    ///
    /// Stale or superseded tickets are ignored. A failed measurement places
    /// the overlay at the configured [`FallbackPosition`] and reports
    /// [`OverlayEvent::Degraded`].
    pub fn on_measured(
        &mut self,
        host: &mut H,
        ticket: MeasureTicket,
        result: Result<Rect, MeasureError>,
    ) -> Vec<OverlayEvent> {
        if ticket.overlay != self.id || ticket.generation != self.generation {
            trace!(
                overlay = self.id.get(),
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale measurement"
            );
            return Vec::new();
        }
        if ticket.request != self.request || self.state != CoordinatorState::Measuring {
            trace!(overlay = self.id.get(), request = ticket.request, "discarding superseded measurement");
            return Vec::new();
        }
        self.state = CoordinatorState::Positioning;
        match result {
            Ok(rect) => {
                self.anchor_rect = Some(rect);
                self.last_anchor = Some(rect);
                self.degraded = false;
                if self.config.hide_when_detached && is_detached(rect, self.viewport(host)) {
                    return self.close(host, DismissReason::AnchorDetached);
                }
                self.place(host)
            }
            Err(err) => {
                debug!(overlay = self.id.get(), %err, "anchor measurement failed; using fallback position");
                self.place_degraded(host)
            }
        }
    }

    /// Report that the mounted content laid out at `size`.
    ///
    /// Only the first report of a session triggers a correction; the rest are
    /// ignored.
    pub fn on_content_layout(&mut self, host: &mut H, size: Size) {
        if !self.mounted {
            return;
        }
        if self.corrected {
            trace!(overlay = self.id.get(), "layout correction already applied this session");
            return;
        }
        self.corrected = true;
        self.content_size = Some(size);
        self.update_position(host);
    }

    /// Note a viewport change; the recomputation happens on the next frame.
    ///
    /// Keyboard changes are ignored unless keyboard avoidance is enabled.
    pub fn on_viewport_change(&mut self, change: ViewportChange) {
        if !self.state.is_open() {
            return;
        }
        if change == ViewportChange::Keyboard && !self.config.keyboard_avoidance {
            return;
        }
        let refresh = self.pending.get_or_insert_with(Refresh::default);
        refresh.remeasure |= change.moves_anchor();
        if self.state == CoordinatorState::Positioned {
            self.state = CoordinatorState::Positioning;
        }
        trace!(overlay = self.id.get(), ?change, "refresh scheduled");
    }

    /// Advance to the frame at `now`.
    ///
    /// Flushes a pending refresh and enforces the auto-hide timeout, which
    /// starts at the first frame the overlay is mounted.
    pub fn on_frame(&mut self, host: &mut H, now: Duration) -> Vec<OverlayEvent> {
        if !self.state.is_open() {
            return Vec::new();
        }
        if self.mounted {
            let since = *self.visible_since.get_or_insert(now);
            if let Some(limit) = self.config.auto_hide
                && now.saturating_sub(since) >= limit
            {
                return self.close(host, DismissReason::Timeout);
            }
        }
        if self.state != CoordinatorState::Positioning {
            return Vec::new();
        }
        let Some(refresh) = self.pending.take() else {
            return Vec::new();
        };
        if refresh.remeasure {
            self.measure(host);
            Vec::new()
        } else if self.degraded {
            self.place_degraded(host)
        } else {
            self.place(host)
        }
    }

    /// Pointer down at `point` anywhere on screen.
    ///
    /// Closes the overlay with [`DismissReason::OutsideClick`] if outside
    /// dismissal is enabled and the point hits neither the anchor nor the overlay.
    pub fn on_pointer_down(&mut self, host: &mut H, point: Point) -> Vec<OverlayEvent> {
        if !self.state.is_open() || !self.config.dismiss.contains(DismissFlags::CLICK_OUTSIDE) {
            return Vec::new();
        }
        let on_anchor = self.anchor_rect.is_some_and(|r| r.contains(point));
        let on_overlay = self.mounted && self.last.is_some_and(|r| r.rect().contains(point));
        if on_anchor || on_overlay {
            return Vec::new();
        }
        self.close(host, DismissReason::OutsideClick)
    }

    /// Escape key pressed.
    pub fn on_escape(&mut self, host: &mut H) -> Vec<OverlayEvent> {
        if !self.state.is_open() || !self.config.dismiss.contains(DismissFlags::ESCAPE) {
            return Vec::new();
        }
        self.close(host, DismissReason::Escape)
    }

    /// Close if open and release the overlay's id.
    pub fn dispose(mut self, host: &mut H) -> Vec<OverlayEvent> {
        let events = self.close(host, DismissReason::Programmatic);
        host.listeners().unsubscribe(self.id);
        events
    }

    fn interest(&self) -> Interest {
        let mut interest = Interest::RESIZE | Interest::SCROLL | Interest::FRAME;
        if self.config.keyboard_avoidance {
            interest |= Interest::KEYBOARD;
        }
        if self.config.dismiss.contains(DismissFlags::CLICK_OUTSIDE) {
            interest |= Interest::POINTER;
        }
        if self.config.dismiss.contains(DismissFlags::ESCAPE) {
            interest |= Interest::ESCAPE;
        }
        interest
    }

    fn viewport(&self, host: &H) -> Viewport {
        let mut viewport = host.viewport();
        if !self.config.keyboard_avoidance {
            let keyboard = host.keyboard_inset();
            if keyboard.is_finite() && keyboard > 0.0 {
                viewport.inset_bottom = (viewport.inset_bottom - keyboard).max(0.0);
            }
        }
        viewport
    }

    fn measure(&mut self, host: &mut H) {
        self.state = CoordinatorState::Measuring;
        self.request = self.request.wrapping_add(1);
        let ticket = MeasureTicket {
            overlay: self.id,
            generation: self.generation,
            request: self.request,
        };
        host.request_measure(&self.anchor, ticket);
    }

    fn overlay_width(&self, measured: Size, anchor: Option<Rect>) -> f64 {
        match self.config.width {
            OverlayWidth::Intrinsic => measured.width,
            OverlayWidth::Fixed(width) => width,
            OverlayWidth::Target => anchor.map_or(measured.width, |r| r.width()),
        }
    }

    fn place(&mut self, host: &mut H) -> Vec<OverlayEvent> {
        let Some(anchor) = self.anchor_rect else {
            return self.place_degraded(host);
        };
        let measured = self.content_size.unwrap_or(Size::ZERO);
        let mut overlay = OverlaySize::fixed(Size::new(
            self.overlay_width(measured, Some(anchor)),
            measured.height,
        ));
        if let Some(max_height) = self.config.max_height {
            overlay = overlay.with_max_height(max_height);
        }
        let request = PositioningRequest::new(anchor, overlay, self.viewport(host))
            .with_preferred(self.config.preferred)
            .with_fallbacks(self.config.fallbacks.iter().copied())
            .with_offset(self.config.offset)
            .with_boundary(self.config.boundary);
        let result = compute(&request);
        self.apply(host, result)
    }

    fn place_degraded(&mut self, host: &mut H) -> Vec<OverlayEvent> {
        let newly_degraded = !self.degraded;
        self.degraded = true;
        let viewport = self.viewport(host).sanitized();
        let boundary = self.config.boundary.max(0.0);
        let bounds = viewport.bounds(boundary);

        let measured = self.content_size.unwrap_or(Size::ZERO);
        let max_width = self
            .overlay_width(measured, self.last_anchor)
            .max(0.0)
            .min(bounds.width());
        let max_height = self
            .config
            .max_height
            .unwrap_or(measured.height)
            .max(0.0)
            .min(bounds.height());
        let size = Size::new(
            self.overlay_width(measured, self.last_anchor).max(0.0).min(max_width),
            measured.height.max(0.0).min(max_height),
        );

        let wanted = match self.config.fallback {
            FallbackPosition::BelowStart => self.last_anchor.map_or(
                Point::new(bounds.x0, bounds.y0),
                |r| Point::new(r.x0, r.y1 + self.config.offset.max(0.0)),
            ),
            FallbackPosition::Point(p) => p,
        };
        let result = PositionResult {
            origin: viewport.confine(wanted, size, boundary),
            placement: self.config.preferred,
            size,
            max_width,
            max_height,
            flipped: false,
            shifted: false,
        };
        debug!(overlay = self.id.get(), x = result.origin.x, y = result.origin.y, "degraded placement");
        let mut events = Vec::new();
        if newly_degraded {
            events.push(OverlayEvent::Degraded);
        }
        events.extend(self.apply(host, result));
        events
    }

    fn apply(&mut self, host: &mut H, result: PositionResult) -> Vec<OverlayEvent> {
        let explicit_width = !matches!(self.config.width, OverlayWidth::Intrinsic);
        let style = PositionStyle::from_result(&result, explicit_width, self.degraded);
        if self.mounted {
            host.reposition(self.id, &style);
        } else if let Some(content) = self.content.take() {
            host.mount(self.id, content, &style);
            self.mounted = true;
        }
        // Changes that arrived while measuring are flushed on the next frame.
        self.state = if self.pending.is_some() {
            CoordinatorState::Positioning
        } else {
            CoordinatorState::Positioned
        };

        let mut events = Vec::new();
        if self.last != Some(result) {
            debug!(
                overlay = self.id.get(),
                side = ?result.placement.side,
                flipped = result.flipped,
                shifted = result.shifted,
                "positioned"
            );
            events.push(OverlayEvent::PositionChanged {
                placement: result.placement,
                flipped: result.flipped,
                shifted: result.shifted,
            });
        }
        self.last = Some(result);
        events
    }

    fn close(&mut self, host: &mut H, reason: DismissReason) -> Vec<OverlayEvent> {
        if !self.state.is_open() {
            return Vec::new();
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = CoordinatorState::Closed;
        self.pending = None;
        self.content = None;
        self.visible_since = None;
        if self.mounted {
            host.unmount(self.id);
            self.mounted = false;
        }
        host.listeners().unsubscribe(self.id);
        if self.config.return_focus && reason != DismissReason::OutsideClick {
            host.focus_anchor(&self.anchor);
        }
        debug!(overlay = self.id.get(), ?reason, "closed");
        vec![OverlayEvent::Dismissed(reason)]
    }
}

/// True if `anchor` lies entirely outside the usable viewport.
fn is_detached(anchor: Rect, viewport: Viewport) -> bool {
    let u = viewport.sanitized().usable();
    anchor.x1 < u.x0 || anchor.x0 > u.x1 || anchor.y1 < u.y0 || anchor.y0 > u.y1
}
