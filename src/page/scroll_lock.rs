// SPDX-License-Identifier: MPL-2.0
//! Page scroll lock with acquire/release semantics.
//!
//! While the lightbox is open the page underneath must not scroll. Instead of
//! flipping a page-wide flag from several places, the lock is acquired once and
//! hands out a [`ScrollLease`]. The lease cannot be cloned or forged, and the
//! only way to unlock is to give it back through [`ScrollLock::release`].

use super::Document;
use tracing::debug;

const OVERFLOW: &str = "overflow";
const OVERFLOW_LOCKED: &str = "hidden";

/// Proof that the holder locked page scrolling.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a lease without releasing it leaves the page locked"]
pub struct ScrollLease {
    _private: (),
}

/// Host context whose scrolling can be suspended.
pub trait ScrollLock {
    /// Locks page scrolling.
    fn acquire(&mut self) -> ScrollLease;

    /// Unlocks page scrolling, consuming the lease.
    fn release(&mut self, lease: ScrollLease);

    /// Whether page scrolling is currently suspended.
    fn is_scroll_locked(&self) -> bool;
}

impl ScrollLock for Document {
    fn acquire(&mut self) -> ScrollLease {
        let body = self.body();
        self.set_style(body, OVERFLOW, OVERFLOW_LOCKED);
        debug!("page scroll locked");
        ScrollLease { _private: () }
    }

    fn release(&mut self, lease: ScrollLease) {
        let ScrollLease { _private: () } = lease;
        let body = self.body();
        self.remove_style(body, OVERFLOW);
        debug!("page scroll released");
    }

    fn is_scroll_locked(&self) -> bool {
        self.style(self.body(), OVERFLOW) == Some(OVERFLOW_LOCKED)
    }
}
