// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay lifecycle against a simulated platform.
//!
//! The host below queues measurement requests and resolves them one "layout
//! pass" later, the way a real platform would. It also routes global events
//! through the listener registry so only open overlays see them.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlay_lifecycle`

use std::collections::HashMap;
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_overlay::config::OverlayConfig;
use understory_overlay::coordinator::OverlayCoordinator;
use understory_overlay::host::OverlayHost;
use understory_overlay::registry::{Interest, ListenerRegistry, OverlayId};
use understory_overlay::types::{
    CoordinatorState, DismissReason, MeasureError, MeasureTicket, OverlayEvent, PositionStyle,
    ViewportChange,
};
use understory_placement::Viewport;

#[derive(Default)]
struct SimHost {
    viewport: Viewport,
    listeners: ListenerRegistry,
    // Trigger element name -> on-screen rectangle; missing means unmounted.
    elements: HashMap<&'static str, Rect>,
    queued: Vec<(&'static str, MeasureTicket)>,
    mounted: HashMap<OverlayId, (&'static str, PositionStyle)>,
}

impl SimHost {
    /// Resolve every queued measurement, returning (ticket, result) pairs.
    fn layout_pass(&mut self) -> Vec<(MeasureTicket, Result<Rect, MeasureError>)> {
        self.queued
            .drain(..)
            .map(|(name, ticket)| {
                let result = self
                    .elements
                    .get(name)
                    .copied()
                    .ok_or(MeasureError::Detached);
                (ticket, result)
            })
            .collect()
    }
}

impl OverlayHost for SimHost {
    type Anchor = &'static str;
    type Content = &'static str;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_measure(&mut self, anchor: &&'static str, ticket: MeasureTicket) {
        self.queued.push((anchor, ticket));
    }

    fn mount(&mut self, overlay: OverlayId, content: &'static str, style: &PositionStyle) {
        println!("  mount {:?} {content:?} at {:?}", overlay, style.origin);
        self.mounted.insert(overlay, (content, *style));
    }

    fn reposition(&mut self, overlay: OverlayId, style: &PositionStyle) {
        println!("  move  {:?} to {:?}", overlay, style.origin);
        if let Some(entry) = self.mounted.get_mut(&overlay) {
            entry.1 = *style;
        }
    }

    fn unmount(&mut self, overlay: OverlayId) {
        println!("  unmount {:?}", overlay);
        self.mounted.remove(&overlay);
    }

    fn focus_anchor(&mut self, anchor: &&'static str) {
        println!("  focus {anchor}");
    }

    fn listeners(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }
}

type Overlay = OverlayCoordinator<SimHost>;

fn settle(host: &mut SimHost, overlays: &mut [&mut Overlay]) -> Vec<OverlayEvent> {
    let mut events = Vec::new();
    for (ticket, result) in host.layout_pass() {
        for o in overlays.iter_mut() {
            if o.id() == ticket.overlay {
                events.extend(o.on_measured(host, ticket, result));
            }
        }
    }
    events
}

fn main() {
    let mut host = SimHost {
        viewport: Viewport::new(800.0, 600.0),
        ..SimHost::default()
    };
    host.elements.insert("color-swatch", Rect::new(300.0, 520.0, 340.0, 544.0));
    host.elements.insert("help-icon", Rect::new(760.0, 60.0, 780.0, 80.0));

    let mut picker = Overlay::new(&mut host, "color-swatch", OverlayConfig::popover());
    let mut tip = Overlay::new(&mut host, "help-icon", OverlayConfig::tooltip());

    println!("== Open both ==");
    picker.show(&mut host, "color picker");
    tip.show(&mut host, "Need help?");
    let events = settle(&mut host, &mut [&mut picker, &mut tip]);
    println!("  events: {:?}", events);
    assert_eq!(picker.state(), CoordinatorState::Positioned);

    println!("== First layout reports real sizes ==");
    picker.on_content_layout(&mut host, Size::new(240.0, 200.0));
    tip.on_content_layout(&mut host, Size::new(110.0, 28.0));
    let events = settle(&mut host, &mut [&mut picker, &mut tip]);
    println!("  events: {:?}", events);
    let (_, style) = host.mounted[&picker.id()];
    // The swatch sits near the bottom edge, so the picker opened above it.
    assert_eq!(style.placement.side, understory_placement::Side::Top);

    println!("== Scroll burst, one recompute ==");
    for r in host.elements.values_mut() {
        *r = *r + Vec2::new(0.0, -40.0);
    }
    let scroll_targets: Vec<_> = host.listeners.subscribers(Interest::SCROLL).collect();
    for _ in 0..5 {
        for id in &scroll_targets {
            for o in [&mut picker, &mut tip] {
                if o.id() == *id {
                    o.on_viewport_change(ViewportChange::Scroll);
                }
            }
        }
    }
    picker.on_frame(&mut host, Duration::from_millis(16));
    tip.on_frame(&mut host, Duration::from_millis(16));
    assert_eq!(host.queued.len(), 2);
    let events = settle(&mut host, &mut [&mut picker, &mut tip]);
    println!("  events: {:?}", events);
    // Scrolled too close to the top for the tooltip to stay above its icon.
    let (_, style) = host.mounted[&tip.id()];
    assert_eq!(style.placement.side, understory_placement::Side::Bottom);

    println!("== Stale measurement after hide ==");
    picker.update_position(&mut host);
    picker.hide(&mut host);
    let events = settle(&mut host, &mut [&mut picker, &mut tip]);
    assert!(events.is_empty());
    assert!(!host.mounted.contains_key(&picker.id()));
    println!("  late measurement dropped; picker stays closed");

    println!("== Escape closes the tooltip ==");
    let escape_targets: Vec<_> = host.listeners.subscribers(Interest::ESCAPE).collect();
    assert_eq!(escape_targets, vec![tip.id()]);
    let events = tip.on_escape(&mut host);
    assert_eq!(events, vec![OverlayEvent::Dismissed(DismissReason::Escape)]);

    println!("== Trigger removed mid-flight ==");
    picker.show(&mut host, "color picker");
    host.elements.remove("color-swatch");
    let events = settle(&mut host, &mut [&mut picker, &mut tip]);
    println!("  events: {:?}", events);
    assert!(picker.is_degraded());

    let events = picker.on_pointer_down(&mut host, Point::new(10.0, 590.0));
    println!("  outside click: {:?}", events);
    assert!(host.mounted.is_empty());
    assert!(host.listeners.is_empty());
}
