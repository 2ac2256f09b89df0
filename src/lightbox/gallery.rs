// SPDX-License-Identifier: MPL-2.0
//! Gallery derived from the page's scatter items.

use crate::page::layout::GALLERY_ITEM_CLASS;
use crate::page::{Document, ElementId};

/// Caption shown when an image carries no `data-caption`.
pub const FALLBACK_CAPTION: &str = "A moment frozen in time...";

/// One navigable image.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    /// Resolved image source.
    pub source: String,
    pub caption: String,
    /// Page element whose click opens this entry.
    pub trigger: ElementId,
}

/// Ordered, immutable list of gallery entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Collects every `img` inside a scatter item, in document order.
    ///
    /// The click trigger is the image's grandparent (the scatter item in the
    /// usual `item > frame > img` markup), falling back to the closest
    /// existing ancestor.
    #[must_use]
    pub fn from_document(document: &Document, placeholder: &str) -> Self {
        let entries = document
            .descendants(document.body())
            .into_iter()
            .filter(|&id| {
                document.get(id).tag() == "img"
                    && document.has_ancestor_with_class(id, GALLERY_ITEM_CLASS)
            })
            .map(|img| {
                let source = document.resolve_source(document.attribute(img, "src").unwrap_or(""));
                let caption = document
                    .data(img, "caption")
                    .filter(|caption| !caption.is_empty())
                    .unwrap_or(placeholder)
                    .to_string();
                let trigger = document
                    .ancestor(img, 2)
                    .or_else(|| document.ancestor(img, 1))
                    .unwrap_or(img);
                GalleryEntry {
                    source,
                    caption,
                    trigger,
                }
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn from_entries(entries: Vec<GalleryEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GalleryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    /// Index of the entry opened by clicking `element`.
    ///
    /// Images without a frame share their grandparent as trigger; the last
    /// of them in document order is the one that opens.
    #[must_use]
    pub fn position_of_trigger(&self, element: ElementId) -> Option<usize> {
        self.entries.iter().rposition(|entry| entry.trigger == element)
    }

    /// Index after `index`, wrapping to the first entry.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        (index + 1) % self.entries.len()
    }

    /// Index before `index`, wrapping to the last entry.
    #[must_use]
    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.entries.len();
        if len == 0 {
            return 0;
        }
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_html;
    use std::path::Path;

    const PAGE: &str = r#"<body>
      <img src="outside.jpg">
      <div class="scatter-item"><div class="frame"><img src="a.jpg" data-caption="Cap A"></div></div>
      <div class="scatter-item"><div class="frame"><img src="b.jpg" data-caption=""></div></div>
      <div class="scatter-item"><img src="c.jpg"></div>
    </body>"#;

    #[test]
    fn only_scatter_item_images_are_collected() {
        let doc = parse_html(PAGE, None);
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);

        let sources: Vec<_> = gallery.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn missing_or_empty_caption_uses_placeholder() {
        let doc = parse_html(PAGE, None);
        let gallery = Gallery::from_document(&doc, "placeholder");

        assert_eq!(gallery.get(0).map(|e| e.caption.as_str()), Some("Cap A"));
        assert_eq!(gallery.get(1).map(|e| e.caption.as_str()), Some("placeholder"));
        assert_eq!(gallery.get(2).map(|e| e.caption.as_str()), Some("placeholder"));
    }

    #[test]
    fn trigger_is_the_grandparent() {
        let doc = parse_html(PAGE, None);
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);
        let items = doc.query_class("scatter-item");

        assert_eq!(gallery.get(0).map(|e| e.trigger), Some(items[0]));
        assert_eq!(gallery.position_of_trigger(items[1]), Some(1));
        // `c.jpg` sits directly in the item, so its grandparent is the body.
        assert_eq!(gallery.get(2).map(|e| e.trigger), Some(doc.body()));
    }

    #[test]
    fn shared_trigger_opens_the_last_image() {
        let doc = parse_html(
            r#"<body><div class="gallery">
              <div class="scatter-item"><img src="a.jpg"></div>
              <div class="scatter-item"><img src="b.jpg"></div>
              <div class="scatter-item"><img src="c.jpg"></div>
            </div></body>"#,
            None,
        );
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);
        let grid = doc.query_class("gallery")[0];

        assert!(gallery.iter().all(|entry| entry.trigger == grid));
        assert_eq!(gallery.position_of_trigger(grid), Some(2));
    }

    #[test]
    fn sources_resolve_against_base_dir() {
        let doc = parse_html(PAGE, Some(Path::new("/site")));
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);

        let first = gallery.get(0).map(|e| e.source.clone());
        assert_eq!(
            first,
            Some(Path::new("/site").join("a.jpg").to_string_lossy().into_owned())
        );
    }

    #[test]
    fn page_without_items_yields_empty_gallery() {
        let doc = parse_html("<body><p>No pictures</p></body>", None);
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);

        assert!(gallery.is_empty());
        assert_eq!(gallery.next_index(0), 0);
        assert_eq!(gallery.previous_index(0), 0);
    }

    #[test]
    fn index_navigation_wraps() {
        let doc = parse_html(PAGE, None);
        let gallery = Gallery::from_document(&doc, FALLBACK_CAPTION);

        assert_eq!(gallery.next_index(2), 0);
        assert_eq!(gallery.previous_index(0), 2);
        for start in 0..gallery.len() {
            assert_eq!(gallery.previous_index(gallery.next_index(start)), start);
        }
    }
}
