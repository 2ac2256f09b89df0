// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay view.
//!
//! Layers, bottom to top: the backdrop (background clicks), the centered
//! image with its caption note, then the previous / next / close controls.
//! The image and the note sit in their own mouse areas so their clicks never
//! reach the backdrop. Wheel zoom is caught by a mouse area wrapping the whole
//! stack, so it works over every layer.

use crate::config::WHEEL_PIXELS_PER_LINE;
use crate::i18n::fluent::I18n;
use crate::lightbox::{Event, Overlay, ZoomLevel};
use crate::page::Document;
use crate::ui::design_tokens::{opacity, palette::WHITE, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::{self, Image};
use iced::widget::{button, mouse_area, responsive, tooltip, Column, Container, Space, Stack, Text};
use iced::{mouse, ContentFit, Element, Length, Size};

pub struct ViewContext<'a> {
    pub document: &'a Document,
    pub overlay: &'a Overlay,
    pub zoom: ZoomLevel,
    pub i18n: &'a I18n,
}

/// Converts an Iced wheel delta (up is positive) into a DOM-style `deltaY`
/// in pixels (down is positive).
#[must_use]
pub fn wheel_delta_y(delta: mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => -y * WHEEL_PIXELS_PER_LINE,
        mouse::ScrollDelta::Pixels { y, .. } => -y,
    }
}

/// Zoom event for a wheel gesture anywhere over the overlay.
#[must_use]
pub fn wheel_event(delta: mouse::ScrollDelta) -> Event {
    Event::Wheel {
        delta_y: wheel_delta_y(delta),
    }
}

/// Unzoomed image box for a window of `available` size.
#[must_use]
pub fn base_image_size(available: Size) -> Size {
    Size::new(
        (available.width * sizing::LIGHTBOX_IMAGE_RATIO).max(1.0),
        (available.height * sizing::LIGHTBOX_IMAGE_RATIO - sizing::NOTE_FOLDED_HEIGHT).max(1.0),
    )
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Event> {
    responsive(move |available: Size| view_inner(&ctx, available)).into()
}

fn view_inner<'a>(ctx: &ViewContext<'a>, available: Size) -> Element<'a, Event> {
    let backdrop = mouse_area(
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop),
    )
    .on_press(Event::BackgroundClicked)
    .interaction(mouse::Interaction::Idle);

    let content = Column::new()
        .push(view_image(ctx, available))
        .push(view_note(ctx))
        .spacing(spacing::SM)
        .align_x(Horizontal::Center);
    let centered = Container::new(content).center(Length::Fill).clip(true);

    let overlay = ctx.overlay;
    let prev = control(
        ctx.document.text(overlay.prev),
        ctx.i18n.tr("lightbox-prev-label"),
        Event::Previous,
        Horizontal::Left,
        Vertical::Center,
    );
    let next = control(
        ctx.document.text(overlay.next),
        ctx.i18n.tr("lightbox-next-label"),
        Event::Next,
        Horizontal::Right,
        Vertical::Center,
    );
    let close = control(
        ctx.document.text(overlay.close),
        ctx.i18n.tr("lightbox-close-label"),
        Event::Close,
        Horizontal::Right,
        Vertical::Top,
    );

    let layers = Stack::new()
        .push(backdrop)
        .push(centered)
        .push(prev)
        .push(next)
        .push(close)
        .width(Length::Fill)
        .height(Length::Fill);

    // Upper layers hide the cursor from the backdrop, so the wheel is caught here.
    mouse_area(layers).on_scroll(wheel_event).into()
}

fn view_image<'a>(ctx: &ViewContext<'a>, available: Size) -> Element<'a, Event> {
    let base = base_image_size(available);
    let zoom = ctx.zoom.value();

    let image = Image::new(image::Handle::from_path(
        ctx.overlay.image_source(ctx.document),
    ))
    .width(Length::Fixed(base.width * zoom))
    .height(Length::Fixed(base.height * zoom))
    .content_fit(ContentFit::Contain);

    mouse_area(image).on_press(Event::ImageClicked).into()
}

fn view_note<'a>(ctx: &ViewContext<'a>) -> Element<'a, Event> {
    let caption = Text::new(ctx.overlay.caption(ctx.document)).size(typography::CAPTION);
    let note = Container::new(caption)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::container::paper_note);

    let note = if ctx.overlay.is_note_expanded(ctx.document) {
        note.width(Length::Fixed(sizing::NOTE_WIDTH))
    } else {
        note.width(Length::Fixed(sizing::NOTE_WIDTH / 2.0))
            .height(Length::Fixed(sizing::NOTE_FOLDED_HEIGHT))
            .clip(true)
    };

    mouse_area(note)
        .on_press(Event::NoteClicked)
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn control<'a>(
    glyph: &'a str,
    label: String,
    event: Event,
    align_x: Horizontal,
    align_y: Vertical,
) -> Element<'a, Event> {
    let glyph_button = button(Text::new(glyph).size(typography::CONTROL))
        .on_press(event)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::overlay_control(
            WHITE,
            opacity::TRANSPARENT,
            opacity::OVERLAY_MEDIUM,
        ));
    let labelled = tooltip(glyph_button, Text::new(label), tooltip::Position::Bottom).gap(4);

    Container::new(labelled)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(align_x)
        .align_y(align_y)
        .into()
}
