// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: a deterministic, `no_std` lifecycle coordinator for anchored overlays.
//!
//! ## Overview
//!
//! Tooltips, popovers, and picker dropdowns need more than a placement formula.
//! The anchor has to be measured (asynchronously), the content's own size is
//! unknown until it has painted once, scrolling and on-screen keyboards keep
//! changing the inputs, and the user can dismiss the overlay at any time.
//! [`OverlayCoordinator`](crate::coordinator::OverlayCoordinator) owns that
//! lifecycle for one trigger/overlay pair and uses
//! [`understory_placement::compute`] for the geometry.
//!
//! It performs no I/O itself. Platform work (measuring, mounting, viewport
//! queries) goes through the [`OverlayHost`](crate::host::OverlayHost) trait, and
//! asynchronous results come back through coordinator methods.
//!
//! ## Lifecycle
//!
//! `Closed → Measuring → Positioning → Positioned`.
//!
//! - [`show`](crate::coordinator::OverlayCoordinator::show) requests a measurement;
//!   a second `show` while open is ignored.
//! - [`on_measured`](crate::coordinator::OverlayCoordinator::on_measured) computes
//!   the position and mounts the content.
//! - Viewport changes move `Positioned → Positioning`; the next frame recomputes.
//! - [`hide`](crate::coordinator::OverlayCoordinator::hide) (or a dismissal) closes
//!   from any state, and late measurements from the closed session are dropped.
//!
//! ## Global listeners
//!
//! A host-owned [`ListenerRegistry`](crate::registry::ListenerRegistry) records
//! which overlays want resize, scroll, keyboard, pointer, escape, and frame events.
//! Coordinators subscribe on show and unsubscribe on hide. Each open overlay runs
//! its own state machine; overlays never share mutable state.
//!
//! ## Failure handling
//!
//! - An anchor that cannot be measured places the overlay at a configured
//!   fallback position and reports [`OverlayEvent::Degraded`](crate::types::OverlayEvent::Degraded).
//! - Measurements that arrive after their session ended are discarded.
//! - Nothing is ever returned as an error to the caller.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_overlay::config::OverlayConfig;
//! use understory_overlay::coordinator::OverlayCoordinator;
//! use understory_overlay::host::OverlayHost;
//! use understory_overlay::registry::{ListenerRegistry, OverlayId};
//! use understory_overlay::types::{CoordinatorState, MeasureTicket, PositionStyle};
//! use understory_placement::Viewport;
//!
//! #[derive(Default)]
//! struct Host {
//!     listeners: ListenerRegistry,
//!     pending: Vec<MeasureTicket>,
//!     placed: Option<PositionStyle>,
//! }
//!
//! impl OverlayHost for Host {
//!     type Anchor = &'static str;
//!     type Content = &'static str;
//!     fn viewport(&self) -> Viewport { Viewport::new(800.0, 600.0) }
//!     fn request_measure(&mut self, _anchor: &&'static str, ticket: MeasureTicket) {
//!         self.pending.push(ticket);
//!     }
//!     fn mount(&mut self, _id: OverlayId, _content: &'static str, style: &PositionStyle) {
//!         self.placed = Some(*style);
//!     }
//!     fn reposition(&mut self, _id: OverlayId, style: &PositionStyle) { self.placed = Some(*style); }
//!     fn unmount(&mut self, _id: OverlayId) { self.placed = None; }
//!     fn listeners(&mut self) -> &mut ListenerRegistry { &mut self.listeners }
//! }
//!
//! let mut host = Host::default();
//! let config = OverlayConfig::tooltip().with_size_hint(Size::new(120.0, 30.0));
//! let mut tip = OverlayCoordinator::new(&mut host, "save-button", config);
//!
//! tip.show(&mut host, "Save (Ctrl+S)");
//! assert_eq!(tip.state(), CoordinatorState::Measuring);
//!
//! // Later, the platform's layout pass reports the trigger's rectangle.
//! let ticket = host.pending.pop().unwrap();
//! tip.on_measured(&mut host, ticket, Ok(Rect::new(100.0, 0.0, 140.0, 20.0)));
//! assert_eq!(tip.state(), CoordinatorState::Positioned);
//!
//! // No room above a trigger at the top edge, so the tooltip flips below it.
//! assert_eq!(host.placed.unwrap().origin.y, 28.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod coordinator;
pub mod host;
pub mod registry;
pub mod types;
