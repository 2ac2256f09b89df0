// SPDX-License-Identifier: MPL-2.0
//! Lightbox zoom factor.

pub use crate::config::{DEFAULT_ZOOM, DEFAULT_ZOOM_SENSITIVITY, MAX_ZOOM, MIN_ZOOM};

/// Zoom factor, guaranteed to be within the valid range (1×–5×).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Creates a new zoom level, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM
    }

    /// Applies a DOM-style vertical wheel delta (positive scrolls down, which
    /// zooms out).
    #[must_use]
    pub fn apply_wheel(self, delta_y: f32, sensitivity: f32) -> Self {
        Self::new(self.0 + delta_y * -sensitivity)
    }

    /// CSS transform applied to the displayed image.
    #[must_use]
    pub fn transform(self) -> String {
        format!("scale({})", self.0)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}
