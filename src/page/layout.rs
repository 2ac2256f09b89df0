// SPDX-License-Identifier: MPL-2.0
//! Block layout for the hosted page.
//!
//! The layout is intentionally simple and deterministic: every in-flow element
//! gets a [`Rect`] in document coordinates, children stack vertically, gallery
//! containers become fixed-height grids. The view renders with the exact same
//! sizes, so scroll offsets reported by the page scrollable line up with the
//! rectangles the reveal check reads.

use super::{Document, ElementId};
use crate::config::{
    DEFAULT_BLOCK_GAP, DEFAULT_CHAR_WIDTH, DEFAULT_GALLERY_COLUMNS, DEFAULT_LINE_HEIGHT,
    DEFAULT_PAGE_WIDTH, DEFAULT_TILE_HEIGHT,
};

/// Class marking a gallery tile.
pub const GALLERY_ITEM_CLASS: &str = "scatter-item";

/// Class of the fixed overlay subtree, which never takes part in flow layout.
pub const OUT_OF_FLOW_CLASS: &str = "lightbox";

/// Axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Sizing inputs of the layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Available content width.
    pub width: f32,
    pub line_height: f32,
    /// Average advance of one character at body text size.
    pub char_width: f32,
    /// Vertical gap between sibling blocks and between grid cells.
    pub block_gap: f32,
    pub tile_height: f32,
    pub gallery_columns: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
            char_width: DEFAULT_CHAR_WIDTH,
            block_gap: DEFAULT_BLOCK_GAP,
            tile_height: DEFAULT_TILE_HEIGHT,
            gallery_columns: DEFAULT_GALLERY_COLUMNS,
        }
    }
}

impl LayoutMetrics {
    /// Width of one grid cell for the configured column count.
    #[must_use]
    pub fn cell_width(&self, available: f32) -> f32 {
        let columns = self.gallery_columns.max(1) as f32;
        ((available - self.block_gap * (columns - 1.0)) / columns).max(0.0)
    }

    /// Text scale applied to headings.
    #[must_use]
    pub fn text_scale(tag: &str) -> f32 {
        match tag {
            "h1" => 2.0,
            "h2" => 1.6,
            "h3" => 1.3,
            "h4" | "h5" | "h6" => 1.1,
            _ => 1.0,
        }
    }

    /// Height of `text` rendered at `scale` within `width`.
    #[must_use]
    pub fn text_height(&self, text: &str, scale: f32, width: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let chars = text.chars().count() as f32;
        let line_width = width.max(self.char_width * scale);
        let lines = (chars * self.char_width * scale / line_width).ceil().max(1.0);
        lines * self.line_height * scale
    }
}

/// How an element participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Fixed overlay content, skipped by flow layout.
    OutOfFlow,
    /// Fixed-height tile: a gallery item or a bare image.
    Tile,
    /// Container whose children are all gallery items.
    Grid,
    /// Regular block: own text followed by stacked children.
    Flow,
}

/// Classifies `id` for both the layout pass and the view.
#[must_use]
pub fn classify(document: &Document, id: ElementId) -> BlockKind {
    let element = document.get(id);
    if element.has_class(OUT_OF_FLOW_CLASS) {
        return BlockKind::OutOfFlow;
    }
    if element.has_class(GALLERY_ITEM_CLASS) || element.tag() == "img" {
        return BlockKind::Tile;
    }
    let children = element.children();
    if !children.is_empty()
        && children
            .iter()
            .all(|child| document.get(*child).has_class(GALLERY_ITEM_CLASS))
    {
        return BlockKind::Grid;
    }
    BlockKind::Flow
}

/// Lays out the whole body and returns the total page height.
pub fn layout(document: &mut Document, metrics: &LayoutMetrics) -> f32 {
    let body = document.body();
    layout_block(document, body, 0.0, 0.0, metrics.width, metrics)
}

fn layout_block(
    document: &mut Document,
    id: ElementId,
    x: f32,
    top: f32,
    width: f32,
    metrics: &LayoutMetrics,
) -> f32 {
    let height = match classify(document, id) {
        BlockKind::OutOfFlow => return 0.0,
        BlockKind::Tile => {
            let rect = Rect {
                x,
                top,
                width,
                height: metrics.tile_height,
            };
            // Tile content shares the tile box.
            for child in document.descendants(id) {
                document.set_rect(child, rect);
            }
            metrics.tile_height
        }
        BlockKind::Grid => layout_grid(document, id, x, top, width, metrics),
        BlockKind::Flow => {
            let element = document.get(id);
            let scale = LayoutMetrics::text_scale(element.tag());
            let text_height = metrics.text_height(element.text(), scale, width);
            let children = element.children().to_vec();

            let mut cursor = top + text_height;
            let mut has_content = text_height > 0.0;
            for child in children {
                let gap = if has_content { metrics.block_gap } else { 0.0 };
                let child_height = layout_block(document, child, x, cursor + gap, width, metrics);
                // Empty blocks collapse together with their gap.
                if child_height > 0.0 {
                    cursor += gap + child_height;
                    has_content = true;
                }
            }
            cursor - top
        }
    };

    document.set_rect(
        id,
        Rect {
            x,
            top,
            width,
            height,
        },
    );
    height
}

fn layout_grid(
    document: &mut Document,
    id: ElementId,
    x: f32,
    top: f32,
    width: f32,
    metrics: &LayoutMetrics,
) -> f32 {
    let columns = metrics.gallery_columns.max(1) as usize;
    let cell_width = metrics.cell_width(width);
    let children = document.get(id).children().to_vec();
    let rows = children.len().div_ceil(columns);

    for (i, child) in children.into_iter().enumerate() {
        let row = (i / columns) as f32;
        let column = (i % columns) as f32;
        layout_block(
            document,
            child,
            x + column * (cell_width + metrics.block_gap),
            top + row * (metrics.tile_height + metrics.block_gap),
            cell_width,
            metrics,
        );
    }

    if rows == 0 {
        0.0
    } else {
        rows as f32 * metrics.tile_height + (rows as f32 - 1.0) * metrics.block_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            width: 400.0,
            line_height: 20.0,
            char_width: 10.0,
            block_gap: 10.0,
            tile_height: 100.0,
            gallery_columns: 2,
        }
    }

    fn paragraph(doc: &mut Document, text: &str) -> ElementId {
        let p = doc.create_element("p");
        doc.set_text(p, text);
        doc.append_child(doc.body(), p);
        p
    }

    #[test]
    fn paragraphs_stack_with_gap() {
        let mut doc = Document::new();
        let first = paragraph(&mut doc, "short");
        // 50 chars * 10px = 500px on a 400px line: two lines.
        let second = paragraph(&mut doc, &"x".repeat(50));

        let total = layout(&mut doc, &metrics());

        assert_eq!(doc.rect(first).top, 0.0);
        assert_eq!(doc.rect(first).height, 20.0);
        assert_eq!(doc.rect(second).top, 30.0);
        assert_eq!(doc.rect(second).height, 40.0);
        assert_eq!(total, 70.0);
    }

    #[test]
    fn headings_are_taller() {
        let mut doc = Document::new();
        let h1 = doc.create_element("h1");
        doc.set_text(h1, "Title");
        doc.append_child(doc.body(), h1);

        layout(&mut doc, &metrics());

        assert_eq!(doc.rect(h1).height, 40.0);
    }

    #[test]
    fn gallery_container_becomes_grid() {
        let mut doc = Document::new();
        let gallery = doc.create_element("div");
        doc.append_child(doc.body(), gallery);
        let mut imgs = Vec::new();
        for _ in 0..3 {
            let item = doc.create_element("div");
            doc.add_class(item, GALLERY_ITEM_CLASS);
            let img = doc.create_element("img");
            doc.append_child(item, img);
            doc.append_child(gallery, item);
            imgs.push(img);
        }

        assert_eq!(classify(&doc, gallery), BlockKind::Grid);
        layout(&mut doc, &metrics());

        assert_eq!(doc.rect(gallery).height, 210.0);
        assert_eq!(doc.rect(imgs[0]).top, 0.0);
        assert_eq!(doc.rect(imgs[1]).top, 0.0);
        assert_eq!(doc.rect(imgs[1]).x, 205.0);
        assert_eq!(doc.rect(imgs[2]).top, 110.0);
        assert_eq!(doc.rect(imgs[2]).width, 195.0);
    }

    #[test]
    fn overlay_subtree_is_out_of_flow() {
        let mut doc = Document::new();
        let before = paragraph(&mut doc, "a");
        let overlay = doc.create_element("div");
        doc.add_class(overlay, OUT_OF_FLOW_CLASS);
        doc.append_child(doc.body(), overlay);
        let after = paragraph(&mut doc, "b");

        let total = layout(&mut doc, &metrics());

        assert_eq!(doc.rect(overlay), Rect::default());
        assert_eq!(doc.rect(after).top, doc.rect(before).bottom() + 10.0);
        assert_eq!(total, 50.0);
    }

    #[test]
    fn empty_body_has_zero_height() {
        let mut doc = Document::new();
        assert_eq!(layout(&mut doc, &metrics()), 0.0);
    }
}
