// SPDX-License-Identifier: MPL-2.0
//! Scroll-triggered reveal of page sections.
//!
//! Every element tagged with [`REVEAL_CLASS`] starts hidden and gains
//! [`ACTIVE_CLASS`] the first time its top edge comes within the viewport,
//! minus a fixed margin. Activation is permanent: scrolling back up never
//! hides an element again.

use crate::config::DEFAULT_REVEAL_MARGIN;
use crate::page::{Document, ElementId};
use tracing::debug;

pub const REVEAL_CLASS: &str = "reveal";
pub const ACTIVE_CLASS: &str = "active";

/// Visible window over the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Page scroll offset from the document top.
    pub scroll_top: f32,
    pub height: f32,
}

/// Distance above the viewport bottom an element must cross to be revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealMargin(f32);

impl RevealMargin {
    /// Creates a margin; negative or non-finite values fall back to zero.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.max(0.0))
        } else {
            Self(0.0)
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for RevealMargin {
    fn default() -> Self {
        Self(DEFAULT_REVEAL_MARGIN)
    }
}

#[derive(Debug, Clone)]
pub struct RevealController {
    targets: Vec<ElementId>,
    margin: RevealMargin,
}

impl RevealController {
    /// Captures the reveal targets present in `document` right now.
    ///
    /// Elements tagged later are not tracked.
    #[must_use]
    pub fn new(document: &Document, margin: RevealMargin) -> Self {
        let targets = document.query_class(REVEAL_CLASS);
        debug!(count = targets.len(), "reveal targets collected");
        Self { targets, margin }
    }

    #[must_use]
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    #[must_use]
    pub fn margin(&self) -> RevealMargin {
        self.margin
    }

    /// Marks every target whose top edge is above `viewport.height - margin`.
    ///
    /// Returns how many elements were revealed by this call.
    pub fn check_reveal(&self, document: &mut Document, viewport: Viewport) -> usize {
        let threshold = viewport.height - self.margin.value();
        let mut revealed = 0;

        for &target in &self.targets {
            if document.bounding_top(target, viewport.scroll_top) < threshold
                && document.add_class(target, ACTIVE_CLASS)
            {
                revealed += 1;
            }
        }

        if revealed > 0 {
            debug!(revealed, scroll_top = viewport.scroll_top, "sections revealed");
        }
        revealed
    }

    /// Whether `id` is a reveal target that has not been revealed yet.
    #[must_use]
    pub fn is_hidden(&self, document: &Document, id: ElementId) -> bool {
        document.has_class(id, REVEAL_CLASS) && !document.has_class(id, ACTIVE_CLASS)
    }
}
