// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Page surface behind the hosted document.
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PAPER)),
        text_color: Some(palette::INK),
        ..Default::default()
    }
}

/// Tile shown while a gallery image has no decodable source.
pub fn tile_placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_200)),
        text_color: Some(palette::GRAY_400),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Full-window lightbox backdrop.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..BLACK
        })),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Caption note pinned under the lightbox image.
pub fn paper_note(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PAPER_NOTE)),
        text_color: Some(palette::INK),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..BLACK
            },
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Page-level status message (empty page, load failure).
pub fn notice(is_error: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        text_color: Some(if is_error {
            palette::ERROR_500
        } else {
            palette::GRAY_400
        }),
        ..Default::default()
    }
}
