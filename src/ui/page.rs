// SPDX-License-Identifier: MPL-2.0
//! Page pane: renders the hosted document inside a scrollable.
//!
//! Every block is drawn with the exact size the layout pass assigned to it,
//! and vertical gaps are rebuilt from the rectangles. Scroll offsets reported
//! by the scrollable therefore match [`Document::bounding_top`]. Reveal
//! targets that are still hidden keep their box as empty space, so revealing
//! them never moves anything else.

use crate::lightbox::Gallery;
use crate::page::layout::{classify, BlockKind, LayoutMetrics};
use crate::page::{Document, ElementId, Rect};
use crate::reveal::RevealController;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::scroll_lock;
use iced::font::{Font, Weight};
use iced::widget::image::{self, Image};
use iced::widget::scrollable::Viewport;
use iced::widget::text::LineHeight;
use iced::widget::{mouse_area, Column, Container, Row, Scrollable, Space, Text};
use iced::{mouse, ContentFit, Element, Length, Pixels};

/// Narrowest content width the layout is run with.
pub const MIN_CONTENT_WIDTH: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Page scroll offset and visible height after a scroll.
    Scrolled { offset_y: f32, height: f32 },
    /// A gallery trigger was pressed.
    TriggerPressed(ElementId),
}

pub struct ViewContext<'a> {
    pub document: &'a Document,
    pub metrics: &'a LayoutMetrics,
    pub reveal: &'a RevealController,
    pub gallery: &'a Gallery,
    /// Drops wheel scrolling while the lightbox holds the page.
    pub scroll_locked: bool,
}

/// Layout width available to the document inside a window of `window_width`.
#[must_use]
pub fn content_width(window_width: f32) -> f32 {
    (window_width - 2.0 * spacing::LG - sizing::SCROLLBAR_ALLOWANCE).max(MIN_CONTENT_WIDTH)
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = view_block(&ctx, ctx.document.body());

    let scrollable = Scrollable::new(Container::new(content).padding([0.0, spacing::LG]))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::Scrolled {
            offset_y: viewport.absolute_offset().y,
            height: viewport.bounds().height,
        });

    Container::new(scroll_lock(scrollable, ctx.scroll_locked))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page)
        .into()
}

fn view_block<'a>(ctx: &ViewContext<'a>, id: ElementId) -> Element<'a, Message> {
    let rect = ctx.document.rect(id);
    if ctx.reveal.is_hidden(ctx.document, id) {
        return placeholder(rect);
    }

    let block = match classify(ctx.document, id) {
        BlockKind::OutOfFlow => return Space::new().into(),
        BlockKind::Tile => view_tile(ctx, id, rect),
        BlockKind::Grid => view_grid(ctx, id),
        BlockKind::Flow => view_flow(ctx, id, rect),
    };

    if ctx.gallery.position_of_trigger(id).is_some() {
        mouse_area(block)
            .on_press(Message::TriggerPressed(id))
            .interaction(mouse::Interaction::Pointer)
            .into()
    } else {
        block
    }
}

fn placeholder<'a>(rect: Rect) -> Element<'a, Message> {
    Space::new()
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(rect.height))
        .into()
}

fn view_flow<'a>(ctx: &ViewContext<'a>, id: ElementId, rect: Rect) -> Element<'a, Message> {
    let element = ctx.document.get(id);
    let mut column = Column::new()
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(rect.height));
    let mut cursor = rect.top;

    if !element.text().is_empty() {
        let scale = LayoutMetrics::text_scale(element.tag());
        let height = ctx.metrics.text_height(element.text(), scale, rect.width);
        column = column.push(view_text(ctx.metrics, element.text(), element.tag(), rect.width, height));
        cursor += height;
    }

    for &child in element.children() {
        let child_rect = ctx.document.rect(child);
        if classify(ctx.document, child) == BlockKind::OutOfFlow || child_rect.height <= 0.0 {
            continue;
        }
        let gap = child_rect.top - cursor;
        if gap > 0.0 {
            column = column.push(Space::new().height(Length::Fixed(gap)));
        }
        column = column.push(view_block(ctx, child));
        cursor = child_rect.bottom();
    }

    column.into()
}

fn view_text<'a>(
    metrics: &LayoutMetrics,
    content: &'a str,
    tag: &str,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let scale = LayoutMetrics::text_scale(tag);
    let mut text = Text::new(content)
        .size(typography::BODY * scale)
        .line_height(LineHeight::Absolute(Pixels(metrics.line_height * scale)));
    if scale > 1.0 {
        text = text.font(Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        });
    }

    Container::new(text)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .clip(true)
        .into()
}

fn view_grid<'a>(ctx: &ViewContext<'a>, id: ElementId) -> Element<'a, Message> {
    let columns = ctx.metrics.gallery_columns.max(1) as usize;
    let gap = ctx.metrics.block_gap;

    let rows = ctx
        .document
        .get(id)
        .children()
        .chunks(columns)
        .map(|cells| -> Element<'a, Message> {
            cells
                .iter()
                .fold(Row::new().spacing(gap), |row, &cell| {
                    row.push(view_block(ctx, cell))
                })
                .into()
        });

    Column::with_children(rows).spacing(gap).into()
}

fn view_tile<'a>(ctx: &ViewContext<'a>, id: ElementId, rect: Rect) -> Element<'a, Message> {
    let document = ctx.document;
    let image_id = if document.get(id).tag() == "img" {
        Some(id)
    } else {
        document.first_by_tag(id, "img")
    };
    let source = image_id
        .and_then(|img| document.attribute(img, "src"))
        .filter(|src| !src.trim().is_empty());

    let content: Element<'a, Message> = match source {
        Some(src) => Image::new(image::Handle::from_path(document.resolve_source(src)))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(Text::new(document.text(id)).size(typography::CAPTION))
            .center(Length::Fill)
            .style(styles::container::tile_placeholder)
            .into(),
    };

    Container::new(content)
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(rect.height))
        .clip(true)
        .into()
}
