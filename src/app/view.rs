// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The page pane is always drawn; the lightbox overlay is stacked on top of
//! it while the overlay root is visible.

use super::{Message, PageState};
use crate::i18n::fluent::I18n;
use crate::lightbox::LightboxController;
use crate::page::layout::LayoutMetrics;
use crate::page::{Document, ScrollLock};
use crate::reveal::RevealController;
use crate::ui::{self, design_tokens::{spacing, typography}, styles};
use iced::widget::{Column, Container, Stack, Text};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub page_state: &'a PageState,
    pub document: &'a Document,
    pub metrics: &'a LayoutMetrics,
    pub reveal: &'a RevealController,
    pub lightbox: &'a LightboxController,
    /// Localized settings warning shown above the page.
    pub config_notice: Option<String>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let base = match ctx.page_state {
        PageState::Loaded(_) => ui::page::view(ui::page::ViewContext {
            document: ctx.document,
            metrics: ctx.metrics,
            reveal: ctx.reveal,
            gallery: ctx.lightbox.gallery(),
            scroll_locked: ctx.document.is_scroll_locked(),
        })
        .map(Message::from),
        PageState::Empty => view_notice(ctx.i18n.tr("page-empty"), false),
        PageState::Failed(err) => view_notice(ctx.i18n.tr(err.i18n_key()), true),
    };

    let base = match ctx.config_notice {
        Some(notice) => Column::new()
            .push(view_banner(notice))
            .push(base)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => base,
    };

    let overlay = ctx.lightbox.overlay();
    if !overlay.is_visible(ctx.document) {
        return base;
    }

    let lightbox = ui::lightbox::view(ui::lightbox::ViewContext {
        document: ctx.document,
        overlay,
        zoom: ctx.lightbox.state().zoom(),
        i18n: ctx.i18n,
    })
    .map(Message::Lightbox);

    Stack::new()
        .push(base)
        .push(lightbox)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_banner<'a>(message: String) -> Element<'a, Message> {
    Container::new(Text::new(message).size(typography::CAPTION))
        .width(Length::Fill)
        .padding([spacing::XXS, spacing::LG])
        .style(styles::container::notice(true))
        .into()
}

fn view_notice<'a>(message: String, is_error: bool) -> Element<'a, Message> {
    Container::new(Text::new(message).size(typography::BODY))
        .center(Length::Fill)
        .style(styles::container::notice(is_error))
        .into()
}
