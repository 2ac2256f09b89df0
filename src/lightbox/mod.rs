// SPDX-License-Identifier: MPL-2.0
//! Image lightbox: gallery discovery, overlay subtree and the open/close state
//! machine with navigation, caption note and wheel zoom.

mod controller;
pub mod gallery;
pub mod overlay;
pub mod zoom;

pub use controller::{
    Event, EventKind, Key, LightboxController, LightboxOptions, LightboxState, PhaseKind, Status,
};
pub use gallery::{Gallery, GalleryEntry, FALLBACK_CAPTION};
pub use overlay::Overlay;
pub use zoom::ZoomLevel;
