// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: which overlays want which global events.
//!
//! ## Usage
//!
//! The host owns one [`ListenerRegistry`] for the whole process and forwards
//! each global event (resize, scroll, keyboard, pointer, escape, frame tick) to
//! the overlays returned by [`ListenerRegistry::subscribers`].
//! Coordinators subscribe on show and unsubscribe on hide, so closed overlays
//! never see global events.
//!
//! ```
//! use understory_overlay::registry::{Interest, ListenerRegistry};
//!
//! let mut listeners = ListenerRegistry::new();
//! let a = listeners.register();
//! let b = listeners.register();
//! listeners.subscribe(a, Interest::RESIZE | Interest::ESCAPE);
//! listeners.subscribe(b, Interest::RESIZE);
//!
//! let on_escape: Vec<_> = listeners.subscribers(Interest::ESCAPE).collect();
//! assert_eq!(on_escape, vec![a]);
//!
//! listeners.unsubscribe(a);
//! assert_eq!(listeners.subscribers(Interest::RESIZE).count(), 1);
//! ```

use alloc::vec::Vec;

/// Identifier for one overlay coordinator.
///
/// Allocated sequentially by [`ListenerRegistry::register`]. Ids are unique until
/// a registry has handed out `u32::MAX` of them, after which the counter wraps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

impl OverlayId {
    /// Raw value, for logging or host-side maps.
    pub const fn get(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Global event kinds an overlay can listen for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Interest: u8 {
        /// Window or screen resize.
        const RESIZE   = 0b0000_0001;
        /// Scrolling of any ancestor of the anchor.
        const SCROLL   = 0b0000_0010;
        /// On-screen keyboard visibility or height.
        const KEYBOARD = 0b0000_0100;
        /// Pointer down anywhere.
        const POINTER  = 0b0000_1000;
        /// Escape key.
        const ESCAPE   = 0b0001_0000;
        /// Animation frame ticks.
        const FRAME    = 0b0010_0000;
    }
}

/// Subscription table shared by every coordinator of one host.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    next: u32,
    // Subscription order is preserved so dispatch is deterministic.
    entries: Vec<(OverlayId, Interest)>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh overlay id. The id starts with no subscriptions.
    pub fn register(&mut self) -> OverlayId {
        let id = OverlayId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Set the interests of `id`, replacing any previous subscription.
    ///
    /// An empty set is the same as [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, id: OverlayId, interest: Interest) {
        if interest.is_empty() {
            self.unsubscribe(id);
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = interest,
            None => self.entries.push((id, interest)),
        }
    }

    /// Drop every subscription of `id`. Returns whether there was one.
    pub fn unsubscribe(&mut self, id: OverlayId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != id);
        self.entries.len() != before
    }

    /// Current interests of `id` (empty if unsubscribed).
    pub fn interest(&self, id: OverlayId) -> Interest {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map_or(Interest::empty(), |(_, i)| *i)
    }

    /// Overlays subscribed to any of `interest`, in subscription order.
    pub fn subscribers(&self, interest: Interest) -> impl Iterator<Item = OverlayId> + '_ {
        self.entries
            .iter()
            .filter(move |(_, i)| i.intersects(interest))
            .map(|(k, _)| *k)
    }

    /// Number of subscribed overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no overlay is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
