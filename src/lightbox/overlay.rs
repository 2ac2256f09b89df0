// SPDX-License-Identifier: MPL-2.0
//! Overlay subtree mounted into the page.
//!
//! The overlay is created once at startup and appended to the body:
//!
//! ```text
//! div.lightbox
//! ├── span.lightbox-close
//! ├── div.lightbox-prev
//! ├── div.lightbox-next
//! ├── img
//! └── div.paper-note
//!     └── div.note-content
//! ```
//!
//! All visual state is expressed as classes and inline styles on these
//! elements; the view reads them back when rendering.

use super::gallery::GalleryEntry;
use super::zoom::ZoomLevel;
use crate::page::{Document, ElementId};

pub const OVERLAY_CLASS: &str = "lightbox";
pub const CLOSE_CLASS: &str = "lightbox-close";
pub const PREV_CLASS: &str = "lightbox-prev";
pub const NEXT_CLASS: &str = "lightbox-next";
pub const NOTE_CLASS: &str = "paper-note";
pub const NOTE_CONTENT_CLASS: &str = "note-content";
/// Marker on the overlay root while it is shown.
pub const VISIBLE_CLASS: &str = "active";
/// Marker on the note while it is unfolded.
pub const EXPANDED_CLASS: &str = "expanded";

pub const CLOSE_GLYPH: &str = "\u{00d7}";
pub const PREV_GLYPH: &str = "\u{276e}";
pub const NEXT_GLYPH: &str = "\u{276f}";

/// Handles to the overlay elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub root: ElementId,
    pub close: ElementId,
    pub prev: ElementId,
    pub next: ElementId,
    pub image: ElementId,
    pub note: ElementId,
    pub note_content: ElementId,
}

impl Overlay {
    /// Builds the overlay subtree and appends it to the body.
    pub fn mount(document: &mut Document, image_alt: &str) -> Self {
        let root = element(document, "div", OVERLAY_CLASS);
        let close = element(document, "span", CLOSE_CLASS);
        document.set_text(close, CLOSE_GLYPH);
        let prev = element(document, "div", PREV_CLASS);
        document.set_text(prev, PREV_GLYPH);
        let next = element(document, "div", NEXT_CLASS);
        document.set_text(next, NEXT_GLYPH);
        let image = document.create_element("img");
        document.set_attribute(image, "src", "");
        document.set_attribute(image, "alt", image_alt);
        let note = element(document, "div", NOTE_CLASS);
        let note_content = element(document, "div", NOTE_CONTENT_CLASS);

        for child in [close, prev, next, image, note] {
            document.append_child(root, child);
        }
        document.append_child(note, note_content);
        document.append_child(document.body(), root);

        let overlay = Self {
            root,
            close,
            prev,
            next,
            image,
            note,
            note_content,
        };
        overlay.apply_zoom(document, ZoomLevel::default());
        overlay
    }

    #[must_use]
    pub fn is_visible(&self, document: &Document) -> bool {
        document.has_class(self.root, VISIBLE_CLASS)
    }

    pub fn set_visible(&self, document: &mut Document, visible: bool) {
        if visible {
            document.add_class(self.root, VISIBLE_CLASS);
        } else {
            document.remove_class(self.root, VISIBLE_CLASS);
        }
    }

    /// Shows `entry` and folds the note back.
    pub fn render(&self, document: &mut Document, entry: &GalleryEntry) {
        document.set_attribute(self.image, "src", entry.source.as_str());
        document.set_text(self.note_content, entry.caption.as_str());
        self.set_note_expanded(document, false);
    }

    #[must_use]
    pub fn is_note_expanded(&self, document: &Document) -> bool {
        document.has_class(self.note, EXPANDED_CLASS)
    }

    pub fn set_note_expanded(&self, document: &mut Document, expanded: bool) {
        if expanded {
            document.add_class(self.note, EXPANDED_CLASS);
        } else {
            document.remove_class(self.note, EXPANDED_CLASS);
        }
    }

    /// Flips the note and returns whether it is expanded afterwards.
    pub fn toggle_note(&self, document: &mut Document) -> bool {
        document.toggle_class(self.note, EXPANDED_CLASS)
    }

    pub fn apply_zoom(&self, document: &mut Document, zoom: ZoomLevel) {
        document.set_style(self.image, "transform", zoom.transform());
    }

    /// Source currently set on the overlay image.
    #[must_use]
    pub fn image_source<'a>(&self, document: &'a Document) -> &'a str {
        document.attribute(self.image, "src").unwrap_or("")
    }

    #[must_use]
    pub fn caption<'a>(&self, document: &'a Document) -> &'a str {
        document.text(self.note_content)
    }

    #[must_use]
    pub fn image_alt<'a>(&self, document: &'a Document) -> &'a str {
        document.attribute(self.image, "alt").unwrap_or("")
    }
}

fn element(document: &mut Document, tag: &str, class: &str) -> ElementId {
    let id = document.create_element(tag);
    document.add_class(id, class);
    id
}
