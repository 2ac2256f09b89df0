// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Reveal**: Scroll-reveal visibility margin
//! - **Zoom**: Lightbox zoom bounds and wheel sensitivity
//! - **Layout**: Page layout metrics

// ==========================================================================
// Reveal Defaults
// ==========================================================================

/// Distance above the viewport bottom an element's top must cross to reveal.
pub const DEFAULT_REVEAL_MARGIN: f32 = 100.0;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom factor on open, on navigation, and on close.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum lightbox zoom factor.
pub const MIN_ZOOM: f32 = 1.0;

/// Maximum lightbox zoom factor.
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom change per unit of vertical wheel delta.
pub const DEFAULT_ZOOM_SENSITIVITY: f32 = 0.001;

/// Upper bound accepted for a configured sensitivity.
pub const MAX_ZOOM_SENSITIVITY: f32 = 0.05;

/// Pixel equivalent of one wheel line, used to normalize line-based deltas.
pub const WHEEL_PIXELS_PER_LINE: f32 = 100.0;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Page content width before the first window resize is known.
pub const DEFAULT_PAGE_WIDTH: f32 = 800.0;

/// Body text line height.
pub const DEFAULT_LINE_HEIGHT: f32 = 24.0;

/// Average body text glyph advance.
pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

/// Vertical gap between blocks and grid cells.
pub const DEFAULT_BLOCK_GAP: f32 = 16.0;

/// Height of a gallery tile.
pub const DEFAULT_TILE_HEIGHT: f32 = 220.0;

/// Gallery grid columns.
pub const DEFAULT_GALLERY_COLUMNS: u32 = 3;

/// Minimum gallery grid columns.
pub const MIN_GALLERY_COLUMNS: u32 = 1;

/// Maximum gallery grid columns.
pub const MAX_GALLERY_COLUMNS: u32 = 8;
